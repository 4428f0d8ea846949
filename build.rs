//! Build script for zonewall
//!
//! Embeds build-time information (git commit, dirty status, build timestamp)
//! for the `--version` output and the window title.

fn main() {
    shadow_rs::ShadowBuilder::builder()
        .build()
        .expect("Failed to generate build info");
}
