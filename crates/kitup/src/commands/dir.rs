use anstream::println;
use owo_colors::OwoColorize;

use crate::config::Config;

pub fn dir(config: &Config) {
    println!("{}", config.install_dir.cyan());
}
