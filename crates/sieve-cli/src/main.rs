//! comment-sieve - YouTube comment fetcher and script filter
//!
//! Fetches the first page of top-level comments on a video, drops the
//! uploader's own comments, and writes two files: every remaining comment,
//! and the subset containing characters from a target script (Hangul by
//! default).
//!
//! ## Quick Start
//!
//! ```bash
//! # Put the key in .env
//! echo 'YOUTUBE_API_KEY=...' > .env
//!
//! # Fetch and filter (prompts for the URL when omitted)
//! comment-sieve fetch "https://www.youtube.com/watch?v=VIDEO_ID"
//!
//! # Check the setup
//! comment-sieve doctor
//! ```

mod commands;

fn main() {
    if let Err(err) = commands::run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(commands::exit_code(&err));
    }
}
