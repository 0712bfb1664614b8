pub mod ls;
pub mod run;
pub mod show;
