//! PlotIntent- und PlotCommand-Enums für den Intent/Command-Datenfluss.
//!
//! Intents sind rohe Eingaben der Event-Quelle ohne Mutationslogik.
//! Commands sind die daraus abgeleiteten, mutierenden Schritte.

use glam::DVec2;

/// Maustaste.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Primärtaste
    Left,
    /// Sekundärtaste
    Right,
    /// Mittlere Taste
    Middle,
}

/// Tastatur-Taste (nur die für Plots relevanten sind benannt).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// Pfeil hoch
    ArrowUp,
    /// Pfeil runter
    ArrowDown,
    /// Pfeil links
    ArrowLeft,
    /// Pfeil rechts
    ArrowRight,
    /// Escape
    Escape,
    /// Enter
    Enter,
    /// Jede andere Taste (DOM-Name)
    Other(String),
}

impl Key {
    /// Parst einen DOM-Tastennamen (`"ArrowUp"`, `"Escape"`, …).
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "Escape" => Key::Escape,
            "Enter" => Key::Enter,
            other => Key::Other(other.to_string()),
        }
    }

    /// Ist es eine Pfeiltaste?
    pub fn is_arrow(&self) -> bool {
        matches!(
            self,
            Key::ArrowUp | Key::ArrowDown | Key::ArrowLeft | Key::ArrowRight
        )
    }
}

/// Eingabe-Events der Event-Quelle.
#[derive(Debug, Clone, PartialEq)]
pub enum PlotIntent {
    /// Taste gedrückt
    PointerDown {
        button: PointerButton,
        position: DVec2,
    },
    /// Taste losgelassen
    PointerUp {
        button: PointerButton,
        position: DVec2,
    },
    /// Klick (nach Down/Up)
    Click {
        button: PointerButton,
        position: DVec2,
    },
    /// Doppelklick
    DoubleClick {
        button: PointerButton,
        position: DVec2,
    },
    /// Mausbewegung
    PointerMove { position: DVec2 },
    /// Tastendruck
    KeyPressed { key: Key },
}

/// Mutierende Commands, ausgeführt durch die Handler.
#[derive(Debug, Clone, PartialEq)]
pub enum PlotCommand {
    /// Plot unter der Position selektieren (Pick)
    SelectAt { position: DVec2 },
    /// Vertex an den aktuellen Plot anhängen
    AppendVertex { position: DVec2 },
    /// Maus-Vorschau aktualisieren
    UpdatePreview { position: DVec2 },
    /// Definition manuell abschließen
    CompleteDefinition,
    /// Definition abbrechen
    CancelDefinition,
    /// Drag auf einem Skeleton-Punkt beginnen
    BeginSkeletonDrag { position: DVec2 },
    /// Laufenden Drag fortsetzen
    UpdateSkeletonDrag { position: DVec2 },
    /// Laufenden Drag beenden
    EndSkeletonDrag { position: DVec2 },
    /// Hover-Zustand und Cursor aktualisieren
    HoverAt { position: DVec2 },
    /// Selektierten Punkt per Taste verschieben
    NudgeSelectedPoint { key: Key },
    /// Klick nach einem Drag verwerfen
    SwallowClick,
}
