//! Geometrie-Hilfen: Mittelpunkte, Schwerpunkt und Kugel-Kartographie.
//! Kugelmodell, keine Ellipsoid-Geodäsie.

use glam::DVec3;

/// Mittlerer Erdradius in Metern.
pub const EARTH_RADIUS: f64 = 6_371_000.0;

/// Mittelpunkt zwischen zwei Positionen.
pub fn midpoint(a: DVec3, b: DVec3) -> DVec3 {
    a.lerp(b, 0.5)
}

/// Arithmetischer Schwerpunkt. `None` bei leerer Eingabe.
pub fn centroid(points: &[DVec3]) -> Option<DVec3> {
    if points.is_empty() {
        return None;
    }
    let sum: DVec3 = points.iter().copied().sum();
    Some(sum / points.len() as f64)
}

/// Geodätische Position (Radiant + Meter über der Kugel).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cartographic {
    /// Längengrad in Radiant
    pub longitude: f64,
    /// Breitengrad in Radiant
    pub latitude: f64,
    /// Höhe über der Kugeloberfläche in Metern
    pub height: f64,
}

impl Cartographic {
    /// Erstellt eine Position aus Grad-Angaben.
    pub fn from_degrees(longitude: f64, latitude: f64, height: f64) -> Self {
        Self {
            longitude: longitude.to_radians(),
            latitude: latitude.to_radians(),
            height,
        }
    }

    /// Konvertiert eine kartesische Position. `None` nahe dem Erdmittelpunkt.
    pub fn from_cartesian(position: DVec3) -> Option<Self> {
        let radius = position.length();
        if !radius.is_finite() || radius < 1e-9 {
            return None;
        }
        Some(Self {
            longitude: position.y.atan2(position.x),
            latitude: (position.z / radius).clamp(-1.0, 1.0).asin(),
            height: radius - EARTH_RADIUS,
        })
    }

    /// Konvertiert zurück in kartesische Koordinaten.
    pub fn to_cartesian(&self) -> DVec3 {
        let radius = EARTH_RADIUS + self.height;
        let (sin_lat, cos_lat) = self.latitude.sin_cos();
        let (sin_lon, cos_lon) = self.longitude.sin_cos();
        DVec3::new(
            radius * cos_lat * cos_lon,
            radius * cos_lat * sin_lon,
            radius * sin_lat,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cartographic_roundtrip_keeps_angles() {
        let carto = Cartographic::from_degrees(13.4, 52.5, 120.0);
        let back = Cartographic::from_cartesian(carto.to_cartesian()).expect("gültige Position");
        assert_relative_eq!(back.longitude, carto.longitude, epsilon = 1e-9);
        assert_relative_eq!(back.latitude, carto.latitude, epsilon = 1e-9);
        assert_relative_eq!(back.height, 120.0, epsilon = 1e-6);
    }

    #[test]
    fn test_origin_has_no_cartographic() {
        assert!(Cartographic::from_cartesian(DVec3::ZERO).is_none());
    }

    #[test]
    fn test_centroid_of_square() {
        let pts = [
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(2.0, 0.0, 0.0),
            DVec3::new(2.0, 2.0, 0.0),
            DVec3::new(0.0, 2.0, 0.0),
        ];
        assert_eq!(centroid(&pts), Some(DVec3::new(1.0, 1.0, 0.0)));
        assert_eq!(centroid(&[]), None);
    }
}
