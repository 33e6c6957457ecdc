// ============================================================================
// REACTIVITY - Valor + subscribers
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

type Callback<T> = Box<dyn Fn(&T)>;

/// Estado reactivo con sistema de notificaciones
pub struct ReactiveState<T> {
    value: Rc<RefCell<T>>,
    subscribers: RefCell<Vec<Callback<T>>>,
}

impl<T: Clone> ReactiveState<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Rc::new(RefCell::new(value)),
            subscribers: RefCell::new(Vec::new()),
        }
    }

    /// Copia del valor actual
    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }

    /// Establecer nuevo valor y notificar subscribers
    pub fn set(&self, new_value: T) {
        *self.value.borrow_mut() = new_value;
        self.notify();
    }

    /// Suscribirse a cambios
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&T) + 'static,
    {
        self.subscribers.borrow_mut().push(Box::new(callback));
    }

    /// El borrow del valor se libera antes de llamar a los subscribers
    fn notify(&self) {
        let current = self.get();
        for callback in self.subscribers.borrow().iter() {
            callback(&current);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn subscribers_see_every_update() {
        let state = ReactiveState::new(0);
        let seen = Rc::new(Cell::new(0));
        let seen_clone = seen.clone();
        state.subscribe(move |v| seen_clone.set(*v));

        state.set(3);
        assert_eq!(seen.get(), 3);
        assert_eq!(state.get(), 3);
    }

    #[test]
    fn subscriber_may_read_the_state() {
        let state = Rc::new(ReactiveState::new(String::from("a")));
        let reader = state.clone();
        let seen = Rc::new(RefCell::new(String::new()));
        let seen_clone = seen.clone();
        state.subscribe(move |_| *seen_clone.borrow_mut() = reader.get());

        state.set("b".to_string());
        assert_eq!(*seen.borrow(), "b");
    }
}
