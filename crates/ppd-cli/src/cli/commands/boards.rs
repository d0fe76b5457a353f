//! `ppd boards` – list built-in board profiles.

use ppd_core::profile;

pub fn run_boards() {
    println!("{:<18} {:<22} URL", "KEY", "NAME");
    for p in profile::builtin_profiles() {
        println!("{:<18} {:<22} {}", p.key, p.name, p.base_url);
    }
}
