// ============================================================================
// SELECTION STATE - Transporteurs elegidos (semántica de conjunto)
// ============================================================================

use std::collections::{BTreeSet, HashSet};

/// Resultado de un toggle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionChange {
    Selected,
    Deselected,
    /// Id desconocido: nunca apareció en la lista ni en el prefill
    Rejected,
}

#[derive(Clone, Debug, Default)]
pub struct SelectionState {
    selected: BTreeSet<i64>,
    known: HashSet<i64>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids vistos en la lista completa o en algún resultado de disponibilidad
    pub fn register_known<I: IntoIterator<Item = i64>>(&mut self, ids: I) {
        self.known.extend(ids);
    }

    pub fn is_known(&self, id: i64) -> bool {
        self.known.contains(&id)
    }

    /// Deseleccionar siempre está permitido (también ids obsoletos);
    /// seleccionar exige un id conocido
    pub fn toggle(&mut self, id: i64) -> SelectionChange {
        if self.selected.remove(&id) {
            SelectionChange::Deselected
        } else if self.known.contains(&id) {
            self.selected.insert(id);
            SelectionChange::Selected
        } else {
            SelectionChange::Rejected
        }
    }

    pub fn is_selected(&self, id: i64) -> bool {
        self.selected.contains(&id)
    }

    /// Orden ascendente, estable para la serialización
    pub fn get_selected(&self) -> Vec<i64> {
        self.selected.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Prefill del modo edición: los ids ya asignados cuentan como conocidos
    pub fn seed_from_field(&mut self, raw: &str) -> usize {
        let ids = Self::parse_field(raw);
        self.known.extend(ids.iter().copied());
        self.selected.extend(ids.iter().copied());
        ids.len()
    }

    /// Valor del campo oculto `transporteur_ids`: array JSON
    pub fn serialize(&self) -> String {
        serde_json::to_string(&self.get_selected()).unwrap_or_else(|_| "[]".to_string())
    }

    /// Acepta `[1,2]`, `["1","2"]` o `1, 2`; lo que no sea un entero se ignora
    pub fn parse_field(raw: &str) -> Vec<i64> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Vec::new();
        }

        let mut ids: Vec<i64> = match serde_json::from_str::<Vec<serde_json::Value>>(raw) {
            Ok(values) => values
                .iter()
                .filter_map(|v| match v {
                    serde_json::Value::Number(n) => n.as_i64(),
                    serde_json::Value::String(s) => s.trim().parse().ok(),
                    _ => None,
                })
                .collect(),
            Err(_) => raw
                .split(',')
                .filter_map(|part| part.trim().parse().ok())
                .collect(),
        };
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}
