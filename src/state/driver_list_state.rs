// ============================================================================
// DRIVER LIST STATE - Último resultado + búsqueda + filtro
// ============================================================================
// Las secciones visibles se derivan siempre de este estado: filtrar o buscar
// nunca provoca una petición nueva.
// ============================================================================

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::models::{AvailabilityResult, Driver, RecommendedVehicle};
use crate::utils::text::{compare_names, matches_search};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    AvailableOnly,
}

impl StatusFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::AvailableOnly => "available-only",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "available-only" | "available" => StatusFilter::AvailableOnly,
            _ => StatusFilter::All,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SectionKind {
    /// Lista completa, antes de cualquier consulta por fechas
    Roster,
    Available,
    SoonAvailable,
    /// Seleccionados que ya no figuran en el resultado actual
    Assigned,
}

impl SectionKind {
    /// Valor de `data-group`
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Roster => "roster",
            SectionKind::Available => "available",
            SectionKind::SoonAvailable => "soon",
            SectionKind::Assigned => "assigned",
        }
    }

    /// Clave i18n del título
    pub fn title_key(&self) -> &'static str {
        match self {
            SectionKind::Roster => "transporteurs",
            SectionKind::Available => "disponibles",
            SectionKind::SoonAvailable => "bientot_disponibles",
            SectionKind::Assigned => "deja_assignes",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DriverRow {
    pub id: i64,
    pub name: String,
    pub vehicle: String,
    pub vehicle_suitable: bool,
    pub available_from: Option<NaiveDate>,
}

impl DriverRow {
    fn from_driver(driver: &Driver, available_from: Option<NaiveDate>) -> Self {
        Self {
            id: driver.id,
            name: driver.name.clone(),
            vehicle: driver.vehicle.clone(),
            vehicle_suitable: driver.vehicle_suitable,
            available_from,
        }
    }

    /// Fila de un id sin datos conocidos (prefill de edición)
    fn unknown(id: i64) -> Self {
        Self {
            id,
            name: String::new(),
            vehicle: String::new(),
            vehicle_suitable: false,
            available_from: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DriverSection {
    pub kind: SectionKind,
    pub rows: Vec<DriverRow>,
}

#[derive(Clone, Debug, PartialEq)]
enum ListSource {
    Nothing,
    Roster(Vec<Driver>),
    Result(AvailabilityResult),
}

#[derive(Clone, Debug)]
pub struct DriverListState {
    source: ListSource,
    search: String,
    status_filter: StatusFilter,
    /// El último intento falló: la lista mostrada es la anterior
    stale: bool,
    /// Todo transporteur visto alguna vez, para nombrar a los ya asignados
    seen: HashMap<i64, DriverRow>,
}

impl Default for DriverListState {
    fn default() -> Self {
        Self {
            source: ListSource::Nothing,
            search: String::new(),
            status_filter: StatusFilter::All,
            stale: false,
            seen: HashMap::new(),
        }
    }
}

impl DriverListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Muestra la lista completa solo si todavía no llegó ningún resultado
    pub fn show_roster(&mut self, drivers: Vec<Driver>) -> bool {
        self.remember(drivers.iter());
        if matches!(self.source, ListSource::Result(_)) {
            return false;
        }
        self.source = ListSource::Roster(drivers);
        true
    }

    /// Reemplazo completo, nunca fusión
    pub fn replace_result(&mut self, result: AvailabilityResult) {
        self.remember(
            result
                .available
                .iter()
                .chain(result.soon_available.iter().map(|s| &s.driver)),
        );
        self.source = ListSource::Result(result);
        self.stale = false;
    }

    pub fn has_result(&self) -> bool {
        matches!(self.source, ListSource::Result(_))
    }

    pub fn mark_stale(&mut self) {
        self.stale = !matches!(self.source, ListSource::Nothing);
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn set_search(&mut self, search: &str) {
        self.search = search.to_string();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_status_filter(&mut self, filter: StatusFilter) {
        self.status_filter = filter;
    }

    pub fn status_filter(&self) -> StatusFilter {
        self.status_filter
    }

    pub fn recommended_vehicles(&self) -> &[RecommendedVehicle] {
        match &self.source {
            ListSource::Result(result) => &result.recommended_vehicles,
            _ => &[],
        }
    }

    pub fn all_driver_ids(&self) -> Vec<i64> {
        match &self.source {
            ListSource::Nothing => Vec::new(),
            ListSource::Roster(drivers) => drivers.iter().map(|d| d.id).collect(),
            ListSource::Result(result) => result.driver_ids(),
        }
    }

    pub fn total_count(&self) -> usize {
        self.all_driver_ids().len()
    }

    pub fn driver(&self, id: i64) -> Option<DriverRow> {
        self.all_sections()
            .into_iter()
            .flat_map(|section| section.rows)
            .find(|row| row.id == id)
    }

    /// Secciones no vacías, ordenadas y filtradas
    pub fn visible_sections(&self) -> Vec<DriverSection> {
        self.all_sections()
            .into_iter()
            .filter(|section| {
                // La lista completa (sin fechas) no tiene disponibilidad conocida: no se filtra
                !(self.status_filter == StatusFilter::AvailableOnly
                    && section.kind == SectionKind::SoonAvailable)
            })
            .map(|mut section| {
                section
                    .rows
                    .retain(|row| matches_search(&self.search, &[&row.name, &row.vehicle]));
                section
            })
            .filter(|section| !section.rows.is_empty())
            .collect()
    }

    /// Como `visible_sections`, más un grupo con los seleccionados ausentes de la lista.
    /// Ese grupo no depende del filtro de estado: una selección nunca queda oculta.
    pub fn visible_sections_for(&self, selected: &[i64]) -> Vec<DriverSection> {
        let mut sections = self.visible_sections();

        let listed = self.all_driver_ids();
        let mut rows: Vec<DriverRow> = selected
            .iter()
            .filter(|id| !listed.contains(id))
            .map(|&id| match self.seen.get(&id) {
                Some(row) => DriverRow { available_from: None, ..row.clone() },
                None => DriverRow::unknown(id),
            })
            .filter(|row| matches_search(&self.search, &[&row.name, &row.vehicle]))
            .collect();

        if !rows.is_empty() {
            // Los desconocidos al final, por id
            rows.sort_by(|a, b| {
                a.name
                    .is_empty()
                    .cmp(&b.name.is_empty())
                    .then_with(|| compare_names(&a.name, &b.name))
                    .then(a.id.cmp(&b.id))
            });
            sections.insert(0, DriverSection { kind: SectionKind::Assigned, rows });
        }
        sections
    }

    pub fn visible_count(&self) -> usize {
        self.visible_sections().iter().map(|s| s.rows.len()).sum()
    }

    fn remember<'a>(&mut self, drivers: impl Iterator<Item = &'a Driver>) {
        for driver in drivers {
            self.seen.insert(driver.id, DriverRow::from_driver(driver, None));
        }
    }

    fn all_sections(&self) -> Vec<DriverSection> {
        let mut sections = match &self.source {
            ListSource::Nothing => Vec::new(),
            ListSource::Roster(drivers) => vec![DriverSection {
                kind: SectionKind::Roster,
                rows: drivers.iter().map(|d| DriverRow::from_driver(d, None)).collect(),
            }],
            ListSource::Result(result) => vec![
                DriverSection {
                    kind: SectionKind::Available,
                    rows: result
                        .available
                        .iter()
                        .map(|d| DriverRow::from_driver(d, None))
                        .collect(),
                },
                DriverSection {
                    kind: SectionKind::SoonAvailable,
                    rows: result
                        .soon_available
                        .iter()
                        .map(|s| DriverRow::from_driver(&s.driver, Some(s.available_from)))
                        .collect(),
                },
            ],
        };

        for section in sections.iter_mut() {
            section.rows.sort_by(|a, b| {
                b.vehicle_suitable
                    .cmp(&a.vehicle_suitable)
                    .then_with(|| compare_names(&a.name, &b.name))
            });
        }
        sections
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SoonAvailableDriver;

    fn driver(id: i64, name: &str, vehicle: &str, suitable: bool) -> Driver {
        Driver {
            id,
            name: name.to_string(),
            vehicle: vehicle.to_string(),
            vehicle_suitable: suitable,
        }
    }

    fn sample_result() -> AvailabilityResult {
        AvailabilityResult {
            available: vec![
                driver(1, "Zoé Martin", "Camionnette 12m³", false),
                driver(3, "élodie Bernard", "Camion 20m³", true),
                driver(4, "Albert Petit", "Camion 30m³", true),
            ],
            soon_available: vec![SoonAvailableDriver {
                driver: driver(2, "Hélène Roux", "Camion 20m³", true),
                available_from: NaiveDate::from_ymd_opt(2024, 6, 5).unwrap(),
            }],
            recommended_vehicles: Vec::new(),
        }
    }

    fn ids(sections: &[DriverSection]) -> Vec<Vec<i64>> {
        sections.iter().map(|s| s.rows.iter().map(|r| r.id).collect()).collect()
    }

    #[test]
    fn suitable_first_then_name() {
        let mut list = DriverListState::new();
        list.replace_result(sample_result());
        let sections = list.visible_sections();
        assert_eq!(sections[0].kind, SectionKind::Available);
        assert_eq!(sections[1].kind, SectionKind::SoonAvailable);
        assert_eq!(ids(&sections), vec![vec![4, 3, 1], vec![2]]);
        assert_eq!(
            sections[1].rows[0].available_from,
            NaiveDate::from_ymd_opt(2024, 6, 5)
        );
    }

    #[test]
    fn empty_search_is_identity() {
        let mut list = DriverListState::new();
        list.replace_result(sample_result());
        let before = list.visible_sections();
        list.set_search("");
        assert_eq!(list.visible_sections(), before);
        assert_eq!(list.visible_count(), 4);
    }

    #[test]
    fn search_matches_name_and_vehicle_without_accents() {
        let mut list = DriverListState::new();
        list.replace_result(sample_result());

        list.set_search("HELENE");
        assert_eq!(ids(&list.visible_sections()), vec![vec![2]]);

        list.set_search("20m");
        assert_eq!(ids(&list.visible_sections()), vec![vec![3], vec![2]]);

        list.set_search("personne");
        assert!(list.visible_sections().is_empty());
        assert_eq!(list.visible_count(), 0);
    }

    #[test]
    fn available_only_hides_soon_group() {
        let mut list = DriverListState::new();
        list.replace_result(sample_result());
        list.set_status_filter(StatusFilter::AvailableOnly);
        assert_eq!(ids(&list.visible_sections()), vec![vec![4, 3, 1]]);
        list.set_status_filter(StatusFilter::All);
        assert_eq!(list.visible_sections().len(), 2);
    }

    #[test]
    fn roster_never_overwrites_a_result() {
        let mut list = DriverListState::new();
        assert!(list.show_roster(vec![driver(9, "Roster", "", false)]));
        assert_eq!(list.visible_sections()[0].kind, SectionKind::Roster);

        list.replace_result(sample_result());
        assert!(!list.show_roster(vec![driver(9, "Roster", "", false)]));
        assert_eq!(list.all_driver_ids(), vec![1, 3, 4, 2]);
    }

    #[test]
    fn new_result_replaces_previous_one() {
        let mut list = DriverListState::new();
        list.replace_result(sample_result());
        list.replace_result(AvailabilityResult {
            available: vec![driver(8, "Nouveau", "Camion", true)],
            ..AvailabilityResult::default()
        });
        assert_eq!(list.all_driver_ids(), vec![8]);
        assert!(list.driver(1).is_none());
    }

    #[test]
    fn stale_flag_is_cleared_by_fresh_result() {
        let mut list = DriverListState::new();
        list.mark_stale();
        assert!(!list.is_stale());
        list.replace_result(sample_result());
        list.mark_stale();
        assert!(list.is_stale());
        list.replace_result(sample_result());
        assert!(!list.is_stale());
    }

    #[test]
    fn selected_driver_missing_from_result_stays_visible() {
        let mut list = DriverListState::new();
        list.show_roster(vec![driver(9, "Marc Durand", "Camion 20m³", true)]);
        list.replace_result(sample_result());

        let sections = list.visible_sections_for(&[3, 9, 42]);
        assert_eq!(sections[0].kind, SectionKind::Assigned);
        assert_eq!(ids(&sections[..1]), vec![vec![9, 42]]);
        assert_eq!(sections[0].rows[0].name, "Marc Durand");
        // Id desconocido: sin nombre, la vista pone un texto genérico
        assert_eq!(sections[0].rows[1].name, "");
        // El 3 sigue en su grupo normal
        assert_eq!(ids(&sections[1..]), vec![vec![4, 3, 1], vec![2]]);
    }

    #[test]
    fn assigned_group_ignores_status_filter_but_not_search() {
        let mut list = DriverListState::new();
        list.show_roster(vec![driver(9, "Marc Durand", "Camion 20m³", true)]);
        list.replace_result(sample_result());
        list.set_status_filter(StatusFilter::AvailableOnly);
        assert_eq!(list.visible_sections_for(&[9])[0].kind, SectionKind::Assigned);

        list.set_search("durand");
        assert_eq!(ids(&list.visible_sections_for(&[9])), vec![vec![9]]);
        list.set_search("zoe");
        assert!(list
            .visible_sections_for(&[9])
            .iter()
            .all(|s| s.kind != SectionKind::Assigned));
    }

    #[test]
    fn no_assigned_group_when_every_selection_is_listed() {
        let mut list = DriverListState::new();
        list.replace_result(sample_result());
        assert_eq!(list.visible_sections_for(&[1, 2]), list.visible_sections());
        assert_eq!(list.visible_sections_for(&[]), list.visible_sections());
    }

    #[test]
    fn status_filter_round_trips_through_strings() {
        assert_eq!(StatusFilter::parse(StatusFilter::AvailableOnly.as_str()), StatusFilter::AvailableOnly);
        assert_eq!(StatusFilter::parse("whatever"), StatusFilter::All);
    }
}
