// ============================================================================
// AVAILABILITY VIEWMODEL - Consulta -> estado (sin DOM)
// ============================================================================
// Flujo: validar -> ticket (generación) -> Loading -> red -> ¿sigue vigente?
// Una respuesta obsoleta se descarta sin tocar el estado.
// ============================================================================

use crate::error::WidgetError;
use crate::models::{AvailabilityResult, RawFormValues};
use crate::services::{AvailabilityService, ApiClient, DriverSource};
use crate::state::{RequestTicket, WidgetState, WidgetStatus};

/// Qué pasó con una consulta (la vista decide qué repintar)
#[derive(Clone, Debug, PartialEq)]
pub enum CheckOutcome {
    /// Formulario inválido, no se llamó al servidor
    Invalid(WidgetError),
    /// La misma consulta ya está en curso
    Skipped,
    /// Llegó tarde: otra consulta más reciente ya está en marcha o terminó
    Discarded,
    Rendered { available: usize, soon_available: usize },
    Empty,
    Failed(WidgetError),
}

impl CheckOutcome {
    /// Hay que repintar la lista
    pub fn changes_list(&self) -> bool {
        matches!(self, CheckOutcome::Rendered { .. } | CheckOutcome::Empty | CheckOutcome::Failed(_))
    }
}

pub struct AvailabilityViewModel<S: DriverSource = ApiClient> {
    service: AvailabilityService<S>,
    state: WidgetState,
}

impl AvailabilityViewModel<ApiClient> {
    pub fn new(state: WidgetState) -> Self {
        Self::with_service(AvailabilityService::new(), state)
    }
}

impl<S: DriverSource> AvailabilityViewModel<S> {
    pub fn with_service(service: AvailabilityService<S>, state: WidgetState) -> Self {
        Self { service, state }
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    /// Parte síncrona: validación y reserva de generación
    pub fn begin(&self, raw: &RawFormValues) -> Result<RequestTicket, CheckOutcome> {
        *self.state.last_attempt.borrow_mut() = Some(raw.clone());

        let query = match self.service.validate(raw) {
            Ok(query) => query,
            Err(err) => {
                log::warn!("⚠️ [AVAILABILITY] Formulaire incomplet: {}", err);
                // Cualquier respuesta pendiente ya no corresponde al formulario
                self.state.tracker.borrow_mut().invalidate();
                self.state.set_status(WidgetStatus::from_error(&err));
                return Err(CheckOutcome::Invalid(err));
            }
        };

        let ticket = self.state.tracker.borrow_mut().begin(&query);
        match ticket {
            Some(ticket) => {
                log::debug!("🔢 [AVAILABILITY] Génération {}", ticket.generation);
                self.state.set_status(WidgetStatus::Loading);
                Ok(ticket)
            }
            None => {
                log::debug!("⏭️ [AVAILABILITY] Requête identique déjà en cours");
                Err(CheckOutcome::Skipped)
            }
        }
    }

    /// Parte síncrona: aplicar la respuesta si el ticket sigue vigente
    pub fn apply_response(
        &self,
        ticket: &RequestTicket,
        response: Result<AvailabilityResult, WidgetError>,
    ) -> CheckOutcome {
        if !self.state.tracker.borrow_mut().finish(ticket) {
            log::info!("🗑️ [AVAILABILITY] Réponse obsolète ignorée (génération {})", ticket.generation);
            return CheckOutcome::Discarded;
        }

        match response {
            Ok(result) => {
                let available = result.available.len();
                let soon_available = result.soon_available.len();
                let empty = result.is_empty();

                self.state
                    .selection
                    .borrow_mut()
                    .register_known(result.driver_ids());
                self.state.list.borrow_mut().replace_result(result);

                if empty {
                    self.state.set_status(WidgetStatus::Empty);
                    CheckOutcome::Empty
                } else {
                    self.state.set_status(WidgetStatus::Ready);
                    CheckOutcome::Rendered { available, soon_available }
                }
            }
            Err(err) => {
                log::error!("❌ [AVAILABILITY] {}", err);
                // La selección no se toca; la lista anterior queda marcada como obsoleta
                self.state.list.borrow_mut().mark_stale();
                self.state.set_status(WidgetStatus::from_error(&err));
                CheckOutcome::Failed(err)
            }
        }
    }

    pub async fn check(&self, raw: &RawFormValues) -> CheckOutcome {
        let ticket = match self.begin(raw) {
            Ok(ticket) => ticket,
            Err(outcome) => return outcome,
        };
        let response = self.service.fetch(&ticket.query).await;
        self.apply_response(&ticket, response)
    }

    /// Reintenta el último intento registrado
    pub async fn retry(&self) -> Option<CheckOutcome> {
        let last = self.state.last_attempt.borrow().clone()?;
        log::info!("🔄 [AVAILABILITY] Nouvel essai");
        Some(self.check(&last).await)
    }

    /// Lista completa inicial; nunca pisa un resultado por fechas
    pub async fn load_roster(&self) -> Result<usize, WidgetError> {
        let roster_pending = !self.state.list.borrow().has_result()
            && !self.state.tracker.borrow().in_flight();
        if roster_pending {
            self.state.set_status(WidgetStatus::LoadingRoster);
        }

        match self.service.roster().await {
            Ok(drivers) => {
                let count = drivers.len();
                self.state
                    .selection
                    .borrow_mut()
                    .register_known(drivers.iter().map(|d| d.id));
                let shown = self.state.list.borrow_mut().show_roster(drivers);
                if shown && self.state.status() == WidgetStatus::LoadingRoster {
                    self.state.set_status(WidgetStatus::Idle);
                }
                Ok(count)
            }
            Err(err) => {
                log::error!("❌ [AVAILABILITY] Liste des transporteurs indisponible: {}", err);
                if self.state.status() == WidgetStatus::LoadingRoster {
                    self.state.set_status(WidgetStatus::from_error(&err));
                }
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use futures::executor::block_on;

    use super::*;
    use crate::models::{Driver, SoonAvailableDriver};
    use crate::services::availability_service::testing::FakeSource;
    use crate::state::SectionKind;
    use crate::utils::count_label;

    fn driver(id: i64, name: &str) -> Driver {
        Driver {
            id,
            name: name.to_string(),
            vehicle: "Camion 20m³".to_string(),
            vehicle_suitable: true,
        }
    }

    fn raw(start: &str, end: &str) -> RawFormValues {
        RawFormValues {
            start: start.to_string(),
            end: end.to_string(),
            move_type: "3".to_string(),
            booking_id: String::new(),
        }
    }

    fn scenario_result() -> AvailabilityResult {
        AvailabilityResult {
            available: vec![driver(1, "Alice")],
            soon_available: vec![SoonAvailableDriver {
                driver: driver(2, "Bruno"),
                available_from: NaiveDate::from_ymd_opt(2024, 6, 5).unwrap(),
            }],
            recommended_vehicles: Vec::new(),
        }
    }

    fn viewmodel(source: FakeSource) -> AvailabilityViewModel<FakeSource> {
        AvailabilityViewModel::with_service(
            AvailabilityService::with_source(source),
            WidgetState::new("EN"),
        )
    }

    #[test]
    fn scenario_available_and_soon_available() {
        let source = FakeSource::default();
        source.push(Ok(scenario_result()));
        let vm = viewmodel(source);

        let outcome = block_on(vm.check(&raw("2024-06-01", "2024-06-03")));
        assert_eq!(outcome, CheckOutcome::Rendered { available: 1, soon_available: 1 });

        let sections = vm.state().list.borrow().visible_sections();
        assert_eq!(sections[0].kind, SectionKind::Available);
        assert_eq!(sections[0].rows[0].id, 1);
        assert_eq!(sections[1].kind, SectionKind::SoonAvailable);
        assert_eq!(sections[1].rows[0].id, 2);
        assert_eq!(sections[1].rows[0].available_from.unwrap().to_string(), "2024-06-05");
        assert_eq!(count_label(vm.state().selected_count(), "EN"), "0 selected");
        assert_eq!(vm.state().status(), WidgetStatus::Ready);
    }

    #[test]
    fn scenario_server_error_keeps_selection() {
        let source = FakeSource::default();
        source.push(Ok(scenario_result()));
        source.push(Err(WidgetError::Http { status: 500, message: "Internal Server Error".into() }));
        let vm = viewmodel(source);

        block_on(vm.check(&raw("2024-06-01", "2024-06-03")));
        vm.state().selection.borrow_mut().toggle(1);

        let outcome = block_on(vm.check(&raw("2024-06-02", "2024-06-03")));
        assert!(matches!(outcome, CheckOutcome::Failed(WidgetError::Http { status: 500, .. })));
        assert!(matches!(vm.state().status(), WidgetStatus::Error { retryable: true, .. }));
        assert_eq!(vm.state().selection.borrow().get_selected(), vec![1]);
        assert!(vm.state().list.borrow().is_stale());
    }

    #[test]
    fn scenario_second_query_wins() {
        let vm = viewmodel(FakeSource::default());

        let first = vm.begin(&raw("2024-06-01", "2024-06-03")).unwrap();
        let second = vm.begin(&raw("2024-06-02", "2024-06-03")).unwrap();

        // la segunda resuelve primero
        let second_result = AvailabilityResult {
            available: vec![driver(7, "Second")],
            ..AvailabilityResult::default()
        };
        assert!(matches!(vm.apply_response(&second, Ok(second_result)), CheckOutcome::Rendered { .. }));

        // la primera llega tarde y se ignora
        let late = AvailabilityResult {
            available: vec![driver(9, "First")],
            ..AvailabilityResult::default()
        };
        assert_eq!(vm.apply_response(&first, Ok(late)), CheckOutcome::Discarded);
        assert_eq!(vm.state().list.borrow().all_driver_ids(), vec![7]);
    }

    #[test]
    fn late_failure_of_superseded_query_is_ignored() {
        let vm = viewmodel(FakeSource::default());
        let first = vm.begin(&raw("2024-06-01", "2024-06-03")).unwrap();
        let second = vm.begin(&raw("2024-06-02", "2024-06-03")).unwrap();

        let err = WidgetError::Network("offline".into());
        assert_eq!(vm.apply_response(&first, Err(err)), CheckOutcome::Discarded);
        assert_eq!(vm.state().status(), WidgetStatus::Loading);
        assert!(matches!(vm.apply_response(&second, Ok(AvailabilityResult::default())), CheckOutcome::Empty));
    }

    #[test]
    fn identical_query_while_pending_is_skipped() {
        let vm = viewmodel(FakeSource::default());
        let _pending = vm.begin(&raw("2024-06-01", "2024-06-03")).unwrap();
        assert_eq!(vm.begin(&raw("2024-06-01", "2024-06-03")).unwrap_err(), CheckOutcome::Skipped);
    }

    #[test]
    fn invalid_form_renders_inline_state() {
        let source = FakeSource::default();
        let vm = viewmodel(source);
        let outcome = block_on(vm.check(&raw("2024-06-05", "")));
        assert!(matches!(outcome, CheckOutcome::Invalid(WidgetError::Validation(_))));
        assert!(matches!(vm.state().status(), WidgetStatus::Invalid { .. }));
    }

    #[test]
    fn empty_result_is_an_empty_state_not_an_error() {
        let source = FakeSource::default();
        source.push(Ok(AvailabilityResult::default()));
        let vm = viewmodel(source);
        assert_eq!(block_on(vm.check(&raw("2024-06-01", "2024-06-01"))), CheckOutcome::Empty);
        assert_eq!(vm.state().status(), WidgetStatus::Empty);
    }

    #[test]
    fn retry_replays_last_attempt() {
        let source = FakeSource::default();
        source.push(Err(WidgetError::Timeout(10_000)));
        source.push(Ok(scenario_result()));
        let vm = viewmodel(source);

        assert!(matches!(block_on(vm.check(&raw("2024-06-01", "2024-06-03"))), CheckOutcome::Failed(_)));
        assert!(matches!(block_on(vm.retry()), Some(CheckOutcome::Rendered { .. })));
    }

    #[test]
    fn selection_survives_a_fresh_result() {
        let source = FakeSource::default();
        source.push(Ok(scenario_result()));
        source.push(Ok(AvailabilityResult {
            available: vec![driver(5, "Autre")],
            ..AvailabilityResult::default()
        }));
        let vm = viewmodel(source);

        block_on(vm.check(&raw("2024-06-01", "2024-06-03")));
        vm.state().selection.borrow_mut().toggle(2);
        block_on(vm.check(&raw("2024-07-01", "2024-07-03")));

        // el 2 ya no aparece pero sigue seleccionado
        assert_eq!(vm.state().list.borrow().all_driver_ids(), vec![5]);
        assert_eq!(vm.state().selection.borrow().get_selected(), vec![2]);
    }

    #[test]
    fn roster_populates_before_any_check() {
        let source = FakeSource::default();
        *source.roster.borrow_mut() = Some(Ok(vec![driver(1, "Alice"), driver(4, "Denis")]));
        let vm = viewmodel(source);

        assert_eq!(block_on(vm.load_roster()), Ok(2));
        assert_eq!(vm.state().status(), WidgetStatus::Idle);
        assert!(vm.state().selection.borrow().is_known(4));
        assert_eq!(vm.state().list.borrow().visible_sections()[0].kind, SectionKind::Roster);
    }
}
