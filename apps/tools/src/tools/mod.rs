pub mod proficiency_scorer;
pub mod resume_parser;
pub mod skill_matcher;
