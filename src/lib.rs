// Library root
// -----------
// Swipe-card attendance for the grades server. The binary (`main.rs`)
// wires these modules together into the interactive loop.
//
// Module responsibilities:
// - `config`: session parameters taken from the command line.
// - `input`: classifies each line read at the prompt.
// - `api`: the two HTTP calls made per swipe.
// - `parse`: extracts attendee id, name and UID from the returned pages.
// - `logbook`: the append-only attendance file.
// - `ui`: the prompt loop tying the above together.
pub mod api;
pub mod config;
pub mod input;
pub mod logbook;
pub mod parse;
pub mod ui;
