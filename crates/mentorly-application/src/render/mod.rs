//! HTML rendering of the form view-models.
//!
//! Templates are keyed by shape (`single.html`, `multi.html`) and share
//! `field.html`. The `.html` names switch minijinja to HTML auto-escaping,
//! so every value typed by the mentor comes out escaped.

use mentorly_core::form::{ActionControl, FormField, MultiRecordForm, RecordForm, SingleRecordForm, SubjectForm};
use mentorly_core::record::{COURSE_TYPE_OPTIONS, FieldKind, FieldValue, SelectOption};
use mentorly_core::{MentorlyError, Result};
use minijinja::Environment;
use serde::Serialize;

const FIELD_TEMPLATE: &str = include_str!("templates/field.html");
const SINGLE_TEMPLATE: &str = include_str!("templates/single.html");
const MULTI_TEMPLATE: &str = include_str!("templates/multi.html");

fn render_error(err: minijinja::Error) -> MentorlyError {
    MentorlyError::Serialization {
        format: "html".to_string(),
        message: err.to_string(),
    }
}

#[derive(Debug, Serialize)]
struct OptionView {
    value: &'static str,
    label: &'static str,
    selected: bool,
}

fn option_views(options: &'static [SelectOption], current: &str) -> Vec<OptionView> {
    options
        .iter()
        .map(|option| OptionView {
            value: option.value,
            label: option.label,
            selected: option.value == current,
        })
        .collect()
}

#[derive(Debug, Serialize)]
struct FieldView {
    name: &'static str,
    label: &'static str,
    input: &'static str,
    step: Option<&'static str>,
    required: bool,
    disabled: bool,
    value: String,
    checked: bool,
    options: Vec<OptionView>,
}

impl FieldView {
    fn from_field(field: &FormField) -> Self {
        let spec = field.spec;
        let value = match &field.value {
            FieldValue::Bool(_) => String::new(),
            other => other.display_string(),
        };
        let (input, step, options) = match spec.kind {
            FieldKind::Text => ("text", None, Vec::new()),
            FieldKind::TextArea => ("textarea", None, Vec::new()),
            FieldKind::Date => ("date", None, Vec::new()),
            FieldKind::Integer => ("number", None, Vec::new()),
            FieldKind::Decimal => ("number", Some("0.01"), Vec::new()),
            FieldKind::Select(options) => ("select", None, option_views(options, &value)),
            FieldKind::Checkbox => ("checkbox", None, Vec::new()),
        };
        Self {
            name: spec.name,
            label: spec.label,
            input,
            step,
            required: spec.required,
            disabled: !field.enabled,
            checked: field.value.is_truthy(),
            value,
            options,
        }
    }

    fn all<'a>(fields: impl IntoIterator<Item = &'a FormField>) -> Vec<Self> {
        fields.into_iter().map(Self::from_field).collect()
    }
}

#[derive(Debug, Serialize)]
struct ControlView {
    label: &'static str,
    busy: bool,
    visible: bool,
}

impl From<&ActionControl> for ControlView {
    fn from(control: &ActionControl) -> Self {
        Self {
            label: control.label(),
            busy: control.is_busy(),
            visible: control.is_visible(),
        }
    }
}

#[derive(Debug, Serialize)]
struct SingleView {
    form_type: &'static str,
    title: &'static str,
    fields: Vec<FieldView>,
    submit: ControlView,
    edit_visible: bool,
}

impl From<&SingleRecordForm> for SingleView {
    fn from(form: &SingleRecordForm) -> Self {
        Self {
            form_type: form.record_type().as_str(),
            title: form.schema().title,
            fields: FieldView::all(form.fields()),
            submit: form.submit().into(),
            edit_visible: form.edit_control_visible(),
        }
    }
}

#[derive(Debug, Serialize)]
struct SubjectView {
    leading: Vec<FieldView>,
    attempts: Vec<FieldView>,
    trailing: Vec<FieldView>,
    add_attempt_visible: bool,
}

impl From<&SubjectForm> for SubjectView {
    fn from(subject: &SubjectForm) -> Self {
        Self {
            leading: FieldView::all(subject.leading_fields()),
            attempts: FieldView::all(subject.attempt_fields()),
            trailing: FieldView::all(subject.trailing_fields()),
            add_attempt_visible: subject.add_attempt_visible(),
        }
    }
}

#[derive(Debug, Serialize)]
struct CourseTypeView {
    locked: bool,
    options: Vec<OptionView>,
}

#[derive(Debug, Serialize)]
struct MultiView {
    form_type: &'static str,
    title: &'static str,
    course_type: Option<CourseTypeView>,
    subjects: Vec<SubjectView>,
    actions_visible: bool,
    edit_visible: bool,
    submit: ControlView,
}

impl From<&MultiRecordForm> for MultiView {
    fn from(form: &MultiRecordForm) -> Self {
        let schema = form.schema();
        let course_type = schema.has_course_type.then(|| CourseTypeView {
            locked: form.course_type_locked(),
            options: option_views(COURSE_TYPE_OPTIONS, form.course_type().unwrap_or_default()),
        });
        Self {
            form_type: schema.record_type.as_str(),
            title: schema.title,
            course_type,
            subjects: form.subjects().iter().map(SubjectView::from).collect(),
            actions_visible: form.actions_visible(),
            edit_visible: form.edit_control_visible(),
            submit: form.submit().into(),
        }
    }
}

/// Renders record forms to HTML fragments.
pub struct FormRenderer {
    env: Environment<'static>,
}

impl FormRenderer {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.add_template("field.html", FIELD_TEMPLATE)
            .map_err(render_error)?;
        env.add_template("single.html", SINGLE_TEMPLATE)
            .map_err(render_error)?;
        env.add_template("multi.html", MULTI_TEMPLATE)
            .map_err(render_error)?;
        Ok(Self { env })
    }

    pub fn render(&self, form: &RecordForm) -> Result<String> {
        match form {
            RecordForm::Single(form) => self.render_view("single.html", SingleView::from(form)),
            RecordForm::Multi(form) => self.render_view("multi.html", MultiView::from(form)),
        }
    }

    fn render_view<S: Serialize>(&self, name: &str, view: S) -> Result<String> {
        self.env
            .get_template(name)
            .and_then(|template| template.render(view))
            .map_err(render_error)
    }
}
