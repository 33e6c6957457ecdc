// ============================================================================
// APP - Widget de disponibilidad de transporteurs
// ============================================================================
// Orden de montaje:
//   config -> formulario + raíz -> selección inicial (campo oculto)
//   -> modo + filas dinámicas -> esqueleto -> lista completa -> observador
// Cada zona del panel se repinta por separado: seleccionar una fila solo
// toca esa fila y el contador.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::config::CONFIG;
use crate::dom::{
    append_child, clear_children, get_element_by_id, query_selector, set_visible, toggle_class,
    ElementBuilder,
};
use crate::form::{DynamicRows, FormObserver, HiddenField, ModeToggle};
use crate::models::RawFormValues;
use crate::state::{StatusFilter, WidgetState, WidgetStatus};
use crate::utils::{
    t, BUBBLE_ID, COUNTER_ID, LIST_CONTAINER_ID, PANEL_ID, RECOMMENDED_ID, STATUS_CONTAINER_ID,
    TOOLBAR_ID,
};
use crate::viewmodels::{AvailabilityViewModel, CheckOutcome, ModeViewModel, SelectionViewModel};
use crate::views::{
    render_bubble, render_driver_list, render_panel, render_recommended_vehicles,
    render_status_banner, render_toolbar, update_bubble, update_counter, update_driver_row,
    update_filter_buttons,
};

thread_local! {
    // Una sola instancia por página: montar dos veces es un no-op
    static WIDGET: RefCell<Option<Rc<Widget>>> = RefCell::new(None);
}

pub struct Widget {
    state: WidgetState,
    root: Element,
    availability: AvailabilityViewModel,
    selection: SelectionViewModel,
    observer: FormObserver,
}

impl Widget {
    /// Montar el widget (idempotente)
    pub fn mount() -> Result<(), JsValue> {
        if WIDGET.with(|slot| slot.borrow().is_some()) {
            log::warn!("⚠️ [WIDGET] Déjà monté, appel ignoré");
            return Ok(());
        }

        let bindings = &CONFIG.bindings;
        let Some(root) = get_element_by_id(&bindings.widget_root_id) else {
            log::info!("ℹ️ [WIDGET] #{} absent de la page, rien à monter", bindings.widget_root_id);
            return Ok(());
        };

        let form = match root.closest("form")? {
            Some(form) => form,
            None => match query_selector(&bindings.form_selector) {
                Some(form) => form,
                None => {
                    log::warn!("⚠️ [WIDGET] Formulaire de prestation introuvable");
                    return Ok(());
                }
            },
        };

        let state = WidgetState::new(&CONFIG.language);
        let lang = state.lang();

        // Selección renderizada por el servidor (modo edición)
        let hidden = Rc::new(HiddenField::find_or_create(&form, &bindings.selected_ids_field)?);
        let selection = SelectionViewModel::new(state.clone(), hidden);
        selection.seed_from_form();

        let mode = Rc::new(ModeViewModel::new(state.clone()));
        ModeToggle::bind(&form, mode)?;
        DynamicRows::bind_all(&lang)?;

        let widget = Rc::new(Widget {
            availability: AvailabilityViewModel::new(state.clone()),
            selection,
            observer: FormObserver::new(form),
            state,
            root,
        });

        widget.render_skeleton()?;

        {
            let widget_ref = widget.clone();
            widget.state.status.subscribe(move |status| {
                if let Some(panel) = get_element_by_id(PANEL_ID) {
                    let _ = toggle_class(&panel, "is-loading", status.is_loading());
                }
                if let Err(e) = widget_ref.render_status(status) {
                    log::error!("❌ [WIDGET] Rendu du statut: {:?}", e);
                }
            });
        }

        {
            let widget_ref = widget.clone();
            spawn_local(async move {
                if let Ok(count) = widget_ref.availability.load_roster().await {
                    log::info!("📋 [WIDGET] {} transporteur(s) chargé(s)", count);
                }
                widget_ref.render_list_or_log();
            });
        }

        {
            let widget_ref = widget.clone();
            widget.observer.bind(Rc::new(move |values: RawFormValues| {
                widget_ref.run_check(values);
            }))?;
        }

        if let Some(values) = widget.observer.initial_values() {
            log::info!("✏️ [WIDGET] Formulaire pré-rempli, vérification initiale");
            widget.run_check(values);
        }

        WIDGET.with(|slot| *slot.borrow_mut() = Some(widget));
        log::info!("✅ [WIDGET] Monté");
        Ok(())
    }

    /// Acceso a la instancia montada
    pub fn with<R>(f: impl FnOnce(&Rc<Widget>) -> R) -> Option<R> {
        WIDGET.with(|slot| slot.borrow().as_ref().map(f))
    }

    pub fn selected_json(&self) -> String {
        self.state.selection.borrow().serialize()
    }

    /// Releer el formulario y consultar
    pub fn recheck(self: &Rc<Self>) {
        let values = self.observer.values();
        self.run_check(values);
    }

    fn run_check(self: &Rc<Self>, values: RawFormValues) {
        let widget = self.clone();
        spawn_local(async move {
            let outcome = widget.availability.check(&values).await;
            widget.after_check(&outcome);
        });
    }

    fn retry(self: &Rc<Self>) {
        let widget = self.clone();
        spawn_local(async move {
            if let Some(outcome) = widget.availability.retry().await {
                widget.after_check(&outcome);
            }
        });
    }

    fn after_check(self: &Rc<Self>, outcome: &CheckOutcome) {
        log::debug!("🔍 [WIDGET] {:?}", outcome);
        if outcome.changes_list() {
            self.render_list_or_log();
        }
    }

    // ========================================================================
    // SELECCIÓN / BÚSQUEDA / FILTRO
    // ========================================================================

    fn toggle(self: &Rc<Self>, id: i64) {
        self.selection.toggle(id);
        let selected = self.selection.is_selected(id);
        // Rejected también pasa por aquí: el checkbox vuelve a su estado real
        if let Some(list) = get_element_by_id(LIST_CONTAINER_ID) {
            if let Err(e) = update_driver_row(&list, id, selected) {
                log::error!("❌ [SELECTION] {:?}", e);
            }
        }
        self.refresh_counters();
    }

    fn set_search(self: &Rc<Self>, search: String) {
        self.state.list.borrow_mut().set_search(&search);
        self.render_list_or_log();
    }

    fn set_filter(self: &Rc<Self>, filter: StatusFilter) {
        self.state.list.borrow_mut().set_status_filter(filter);
        if let Some(toolbar) = get_element_by_id(TOOLBAR_ID) {
            let _ = update_filter_buttons(&toolbar, filter);
        }
        self.render_list_or_log();
    }

    fn toggle_panel(&self) {
        let open = {
            let mut open = self.state.panel_open.borrow_mut();
            *open = !*open;
            *open
        };
        if let Some(panel) = get_element_by_id(PANEL_ID) {
            let _ = set_visible(&panel, open);
        }
    }

    // ========================================================================
    // RENDER
    // ========================================================================

    fn render_skeleton(self: &Rc<Self>) -> Result<(), JsValue> {
        let lang = self.state.lang();
        clear_children(&self.root);

        let bubble = {
            let widget = self.clone();
            render_bubble(self.selection.count(), &lang, Rc::new(move || widget.toggle_panel()))?
        };
        append_child(&self.root, &bubble)?;
        append_child(&self.root, &render_panel(&lang)?)?;

        if let Some(container) = get_element_by_id(TOOLBAR_ID) {
            let (search, filter) = {
                let list = self.state.list.borrow();
                (list.search().to_string(), list.status_filter())
            };
            let on_search = {
                let widget = self.clone();
                Rc::new(move |value: String| widget.set_search(value))
            };
            let on_filter = {
                let widget = self.clone();
                Rc::new(move |filter: StatusFilter| widget.set_filter(filter))
            };
            let toolbar = render_toolbar(
                &lang,
                &search,
                filter,
                self.selection.count(),
                on_search,
                on_filter,
            )?;
            append_child(&container, &toolbar)?;
        }

        self.render_status(&self.state.status())?;
        self.render_list()
    }

    fn render_status(self: &Rc<Self>, status: &WidgetStatus) -> Result<(), JsValue> {
        let Some(container) = get_element_by_id(STATUS_CONTAINER_ID) else {
            return Ok(());
        };
        clear_children(&container);

        let on_retry = {
            let widget = self.clone();
            Rc::new(move || widget.retry())
        };
        let on_dismiss = {
            let widget = self.clone();
            Rc::new(move || widget.state.set_status(WidgetStatus::Idle))
        };

        if let Some(banner) = render_status_banner(status, &self.state.lang(), on_retry, on_dismiss)? {
            append_child(&container, &banner)?;
        }
        Ok(())
    }

    fn render_list(self: &Rc<Self>) -> Result<(), JsValue> {
        let Some(container) = get_element_by_id(LIST_CONTAINER_ID) else {
            return Ok(());
        };
        let lang = self.state.lang();

        let selected = self.state.selection.borrow().get_selected();
        let (sections, stale, searching, has_drivers) = {
            let list = self.state.list.borrow();
            (
                list.visible_sections_for(&selected),
                list.is_stale(),
                !list.search().trim().is_empty(),
                list.total_count() > 0,
            )
        };

        let on_toggle = {
            let widget = self.clone();
            Rc::new(move |id: i64| widget.toggle(id))
        };
        let element = {
            let selection = self.state.selection.borrow();
            render_driver_list(&sections, &selection, &lang, stale, on_toggle)?
        };

        clear_children(&container);
        append_child(&container, &element)?;

        if sections.is_empty() && has_drivers && searching {
            let empty = ElementBuilder::new("div")?
                .class("text-muted transporteurs-no-match")
                .text(&t("aucun_resultat", &lang))
                .build();
            append_child(&container, &empty)?;
        }

        self.render_recommended()?;
        self.refresh_counters();
        Ok(())
    }

    fn render_list_or_log(self: &Rc<Self>) {
        if let Err(e) = self.render_list() {
            log::error!("❌ [WIDGET] Rendu de la liste: {:?}", e);
        }
    }

    fn render_recommended(&self) -> Result<(), JsValue> {
        let Some(container) = get_element_by_id(RECOMMENDED_ID) else {
            return Ok(());
        };
        clear_children(&container);

        let block = {
            let list = self.state.list.borrow();
            render_recommended_vehicles(list.recommended_vehicles(), &self.state.lang())?
        };
        if let Some(block) = block {
            append_child(&container, &block)?;
        }
        Ok(())
    }

    fn refresh_counters(&self) {
        let count = self.selection.count();
        if let Some(counter) = get_element_by_id(COUNTER_ID) {
            update_counter(&counter, count, &self.state.lang());
        }
        if let Some(bubble) = get_element_by_id(BUBBLE_ID) {
            update_bubble(&bubble, count);
        }
    }
}
