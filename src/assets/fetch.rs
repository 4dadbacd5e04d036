//! Asynchronous glyph-resource fetching.
//!
//! The fetch runs on ehttp's background thread and reports through a bounded
//! channel. Nothing here ever touches scene state: the lifecycle controller
//! drains the channel between frames and applies the result only while it is
//! still running. Dropping the receiver (at teardown) silently discards a
//! late completion — the fetch itself has no cancellation.

use crate::assets::font::Font;
use crate::errors::{HeartfieldError, Result};

/// Starts fetching and parsing a typeface font from `url`.
///
/// Returns immediately; the parsed font (or the terminal-but-cosmetic error)
/// arrives on the channel once, whenever the transfer finishes.
#[must_use]
pub fn fetch_font(url: &str) -> flume::Receiver<Result<Font>> {
    let (tx, rx) = flume::bounded(1);
    let request = ehttp::Request::get(url);
    let url = url.to_string();

    ehttp::fetch(request, move |response| {
        let parsed = response
            .map_err(HeartfieldError::FontFetchFailed)
            .and_then(|resp| {
                if resp.ok {
                    Font::parse(&resp.bytes)
                } else {
                    Err(HeartfieldError::FontFetchStatus {
                        status: resp.status,
                    })
                }
            });

        if tx.send(parsed).is_err() {
            // Receiver already dropped: the view was disposed first.
            log::debug!("Discarding late font result for {url}");
        }
    });

    rx
}
