pub mod dir;
pub mod install;
pub mod list;
pub mod uninstall;
pub mod which;
