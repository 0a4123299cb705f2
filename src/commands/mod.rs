pub mod clean;
pub mod completion;
pub mod describe;
pub mod provision;
pub mod run;
