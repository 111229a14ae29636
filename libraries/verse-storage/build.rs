//! Build script for verse-storage.
//!
//! Ensures the crate is rebuilt when database migrations change.

fn main() {
    println!("cargo:rerun-if-changed=migrations");
}
