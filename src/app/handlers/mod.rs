//! Feature-Handler für PlotCommand-Verarbeitung.
//!
//! Jeder Handler gruppiert die Command-Ausführung eines Feature-Bereichs.
//! Der Controller dispatcht an die passende Handler-Funktion.

pub mod lifecycle;
pub mod sampling;
pub mod selection;
pub mod skeleton;
