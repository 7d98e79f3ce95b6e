//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `mptapp_core` linkage.
//! - Print the voting window for the current local time.

use mptapp_core::{window_at, Clock, SystemClock, VotingWindow};

fn main() {
    println!("mptapp_core ping={}", mptapp_core::ping());
    println!("mptapp_core version={}", mptapp_core::core_version());

    match window_at(SystemClock.now_local()) {
        VotingWindow::Open { closes_at } => {
            println!("voting=open closes_at={}", closes_at.format("%Y-%m-%d %H:%M"));
        }
        VotingWindow::Closed { reopens_at } => {
            println!("voting=closed reopens_at={}", reopens_at.format("%Y-%m-%d %H:%M"));
        }
    }
}
