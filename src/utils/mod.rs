// 工具模块

pub mod validation;

pub use validation::{validate_email, validate_movie_id, validate_password};
