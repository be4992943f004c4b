pub mod use_api_checker;
pub mod use_recommendations;
pub mod use_session;
