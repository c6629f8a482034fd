//! Menu structure every new session starts from

use crate::domain::entities::MenuNode;

pub fn default_menu() -> Vec<MenuNode> {
    vec![
        MenuNode::new("about", "About")
            .with_link("/about")
            .with_icon("info")
            .with_children(vec![
                MenuNode::new("about-team", "Team")
                    .with_link("/team")
                    .with_icon("users"),
                MenuNode::new("about-faq", "FAQ")
                    .with_link("/faq")
                    .with_icon("help"),
            ]),
        MenuNode::new("contact", "Contact")
            .with_link("/contact")
            .with_icon("mail"),
        MenuNode::new("service", "Service")
            .with_link("/service")
            .with_icon("briefcase")
            .with_children(vec![
                MenuNode::new("service-ielts", "IELTS Program")
                    .with_link("/ielts")
                    .with_icon("award"),
                MenuNode::new("service-career", "Career Path")
                    .with_link("/career-path")
                    .with_icon("trending-up"),
            ]),
        MenuNode::new("course", "Course")
            .with_link("/course")
            .with_icon("book")
            .with_children(vec![
                MenuNode::new("course-general", "General English").with_link("/course/general"),
                MenuNode::new("course-business", "Business English")
                    .with_link("/course/business"),
            ]),
    ]
}
