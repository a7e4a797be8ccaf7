//! Application state and key handling
//!
//! The demo plays the UI layer: it registers every field of the definition,
//! keeps the returned props, and feeds keystrokes back through `on_change`.
//! In uncontrolled mode each input also owns a [`TextSurface`] that it binds
//! to the form.

use crate::platform::COMMAND_MODIFIER;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use formbind::state::forms::{
    BindingProps, FieldErrors, Form, FormDefinition, FormEngine, FormMode, FormState, FormValues,
    InputSurface, SubmitEvent, SubmitHandler, TextSurface,
};
use std::cell::RefCell;
use std::rc::Rc;

/// Result of the most recent submission, as seen by the submit callbacks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LastSubmit {
    Accepted(FormValues),
    Rejected(FieldErrors),
}

/// One rendered input
pub struct FieldInput {
    pub name: String,
    pub label: String,
    props: BindingProps,
    /// Present in uncontrolled mode
    surface: Option<Rc<TextSurface>>,
}

impl FieldInput {
    pub fn is_surface_bound(&self) -> bool {
        self.surface.is_some()
    }
}

pub struct App {
    definition: FormDefinition,
    form: Form,
    pub inputs: Vec<FieldInput>,
    pub active_field: usize,
    /// Mirror of the form state, refreshed on every commit
    form_state: Rc<RefCell<FormState>>,
    last_submit: Rc<RefCell<Option<LastSubmit>>>,
    submit_handler: SubmitHandler,
    pub status_message: Option<String>,
    quit: bool,
}

impl App {
    pub fn new(definition: FormDefinition, mode: FormMode) -> Result<Self> {
        let form = definition.build(mode)?;

        let mut inputs = Vec::with_capacity(definition.fields.len());
        for field in &definition.fields {
            let props = form.register(&field.name, Some(field.option()))?;
            let surface = props.binder.as_ref().map(|binder| {
                let surface = Rc::new(TextSurface::new(props.default_value.clone()));
                binder.bind(&surface);
                surface
            });
            inputs.push(FieldInput {
                name: field.name.clone(),
                label: field.label().to_string(),
                props,
                surface,
            });
        }

        let form_state = Rc::new(RefCell::new(form.form_state()));
        let mirror = Rc::clone(&form_state);
        form.subscribe(move |state| *mirror.borrow_mut() = state.clone());

        let last_submit = Rc::new(RefCell::new(None));
        let (accepted, rejected) = (Rc::clone(&last_submit), Rc::clone(&last_submit));
        let submit_handler = form.handle_submit(
            move |values| {
                tracing::info!(fields = values.len(), "form accepted");
                *accepted.borrow_mut() = Some(LastSubmit::Accepted(values));
            },
            move |errors| {
                tracing::info!(failures = errors.len(), "form rejected");
                *rejected.borrow_mut() = Some(LastSubmit::Rejected(errors));
            },
        );

        Ok(Self {
            definition,
            form,
            inputs,
            active_field: 0,
            form_state,
            last_submit,
            submit_handler,
            status_message: None,
            quit: false,
        })
    }

    pub fn title(&self) -> &str {
        &self.definition.title
    }

    pub fn mode(&self) -> FormMode {
        self.form.mode()
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn form_state(&self) -> FormState {
        self.form_state.borrow().clone()
    }

    pub fn last_submit(&self) -> Option<LastSubmit> {
        self.last_submit.borrow().clone()
    }

    /// Value currently shown by input `index`
    pub fn field_value(&self, index: usize) -> String {
        let Some(input) = self.inputs.get(index) else {
            return String::new();
        };
        match &input.surface {
            Some(surface) => surface.value(),
            None => self.form.get_value(&input.name).unwrap_or_default(),
        }
    }

    /// Error from the last submission for input `index`
    pub fn field_error(&self, index: usize) -> Option<String> {
        let input = self.inputs.get(index)?;
        self.form_state
            .borrow()
            .error(&input.name)
            .map(str::to_string)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => self.quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => self.quit = true,
            KeyCode::Char('r') if key.modifiers.contains(COMMAND_MODIFIER) => self.reset(),
            KeyCode::Char('t') if key.modifiers.contains(COMMAND_MODIFIER) => self.toggle_mode()?,
            KeyCode::Tab | KeyCode::Down => self.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.prev_field(),
            KeyCode::Enter => self.submit(),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER) =>
            {
                self.input_char(c)
            }
            _ => {}
        }
        Ok(())
    }

    pub fn next_field(&mut self) {
        if self.inputs.is_empty() {
            return;
        }
        self.active_field = (self.active_field + 1) % self.inputs.len();
    }

    pub fn prev_field(&mut self) {
        if self.inputs.is_empty() {
            return;
        }
        if self.active_field == 0 {
            self.active_field = self.inputs.len() - 1;
        } else {
            self.active_field -= 1;
        }
    }

    fn input_char(&mut self, c: char) {
        let mut value = self.field_value(self.active_field);
        value.push(c);
        self.emit_change(value);
    }

    fn backspace(&mut self) {
        let mut value = self.field_value(self.active_field);
        if value.pop().is_some() {
            self.emit_change(value);
        }
    }

    fn emit_change(&mut self, value: String) {
        if let Some(input) = self.inputs.get(self.active_field) {
            input.props.on_change.change(value);
        }
    }

    pub fn submit(&mut self) {
        let mut event = SubmitEvent::new();
        (self.submit_handler)(Some(&mut event));

        self.status_message = match self.last_submit() {
            Some(LastSubmit::Accepted(values)) => Some(format!(
                "Submitted {}",
                serde_json::to_string(&values).unwrap_or_default()
            )),
            Some(LastSubmit::Rejected(errors)) => {
                Some(format!("{} field(s) need attention", errors.len()))
            }
            None => None,
        };
    }

    pub fn reset(&mut self) {
        self.form.reset();
        *self.last_submit.borrow_mut() = None;
        self.status_message = Some("Form reset".to_string());
    }

    /// Rebuild the form with the other strategy
    pub fn toggle_mode(&mut self) -> Result<()> {
        let mode = self.mode().toggle();
        tracing::info!(%mode, "switching form strategy");
        *self = Self::new(self.definition.clone(), mode)?;
        self.status_message = Some(format!("Switched to {mode} mode"));
        Ok(())
    }
}
