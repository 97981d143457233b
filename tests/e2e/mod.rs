pub mod contact;
pub mod filesystem;
pub mod games;
pub mod shell;
