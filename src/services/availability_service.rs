// ============================================================================
// AVAILABILITY SERVICE - checkAvailability
// ============================================================================
// Valida antes de tocar la red; el render es responsabilidad del llamador.
// ============================================================================

use crate::error::WidgetError;
use crate::models::{AvailabilityQuery, AvailabilityResult, Driver, RawFormValues};
use crate::services::api_client::ApiClient;

/// Origen de datos de transporteurs (HTTP en producción, fake en tests)
#[allow(async_fn_in_trait)]
pub trait DriverSource {
    async fn fetch_roster(&self) -> Result<Vec<Driver>, WidgetError>;

    async fn fetch_availability(
        &self,
        query: &AvailabilityQuery,
    ) -> Result<AvailabilityResult, WidgetError>;
}

impl DriverSource for ApiClient {
    async fn fetch_roster(&self) -> Result<Vec<Driver>, WidgetError> {
        ApiClient::fetch_roster(self).await
    }

    async fn fetch_availability(
        &self,
        query: &AvailabilityQuery,
    ) -> Result<AvailabilityResult, WidgetError> {
        self.check_availability(query).await
    }
}

#[derive(Clone)]
pub struct AvailabilityService<S: DriverSource = ApiClient> {
    source: S,
}

impl AvailabilityService<ApiClient> {
    pub fn new() -> Self {
        Self::with_source(ApiClient::new())
    }
}

impl Default for AvailabilityService<ApiClient> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: DriverSource> AvailabilityService<S> {
    pub fn with_source(source: S) -> Self {
        Self { source }
    }

    pub fn validate(&self, raw: &RawFormValues) -> Result<AvailabilityQuery, WidgetError> {
        raw.validate()
    }

    /// Validación + consulta. Un ValidationError nunca genera petición.
    pub async fn check_availability(
        &self,
        raw: &RawFormValues,
    ) -> Result<AvailabilityResult, WidgetError> {
        let query = self.validate(raw)?;
        self.fetch(&query).await
    }

    pub async fn fetch(&self, query: &AvailabilityQuery) -> Result<AvailabilityResult, WidgetError> {
        self.source.fetch_availability(query).await
    }

    pub async fn roster(&self) -> Result<Vec<Driver>, WidgetError> {
        self.source.fetch_roster().await
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;

    use super::*;

    /// Fuente falsa: devuelve respuestas encoladas y cuenta las llamadas
    #[derive(Default)]
    pub struct FakeSource {
        pub roster: RefCell<Option<Result<Vec<Driver>, WidgetError>>>,
        pub responses: RefCell<VecDeque<Result<AvailabilityResult, WidgetError>>>,
        pub calls: Cell<usize>,
    }

    impl FakeSource {
        pub fn push(&self, response: Result<AvailabilityResult, WidgetError>) {
            self.responses.borrow_mut().push_back(response);
        }
    }

    impl DriverSource for FakeSource {
        async fn fetch_roster(&self) -> Result<Vec<Driver>, WidgetError> {
            self.roster
                .borrow_mut()
                .take()
                .unwrap_or_else(|| Ok(Vec::new()))
        }

        async fn fetch_availability(
            &self,
            _query: &AvailabilityQuery,
        ) -> Result<AvailabilityResult, WidgetError> {
            self.calls.set(self.calls.get() + 1);
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Ok(AvailabilityResult::default()))
        }
    }
}
