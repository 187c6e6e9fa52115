pub mod check;
pub mod compare;
pub mod fetch;
pub mod grade;
pub mod history;
pub mod init;
pub mod quiz;
pub mod validate;
