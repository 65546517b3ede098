pub mod offering;
pub mod profession;
pub mod raw;
pub mod user;
