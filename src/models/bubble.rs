use serde::{Deserialize, Serialize};

/// Posición en pantalla de la burbuja flotante (cosmético, localStorage)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BubblePosition {
    pub x: f64,
    pub y: f64,
}

impl BubblePosition {
    /// Mantiene la burbuja visible dentro de la ventana
    pub fn clamped(&self, max_x: f64, max_y: f64) -> Self {
        Self {
            x: self.x.max(0.0).min(max_x.max(0.0)),
            y: self.y.max(0.0).min(max_y.max(0.0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_is_clamped_to_viewport() {
        let pos = BubblePosition { x: -20.0, y: 900.0 }.clamped(1200.0, 700.0);
        assert_eq!(pos, BubblePosition { x: 0.0, y: 700.0 });
    }
}
