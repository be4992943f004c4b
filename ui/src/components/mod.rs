//! Shared components: pico.css wrappers and the place widgets every screen
//! is built from.
pub mod empty_state;
pub mod notice;
pub mod pico;
pub mod place_card;
pub mod rating_stars;
pub mod selectable_card;
