// ABOUTME: Create-note form state and validation rules
// ABOUTME: Ordered per-field rules (first failure wins), submit gating while a create is pending

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use notehub_client::{NewNote, Tag};
use std::fmt;
use tui_textarea::TextArea;

pub const TITLE_MIN: usize = 3;
pub const TITLE_MAX: usize = 50;
pub const CONTENT_MAX: usize = 500;

/// A named check on one field's raw value
pub struct Rule {
    pub message: &'static str,
    pub check: fn(&str) -> bool,
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

fn present(value: &str) -> bool {
    !value.is_empty()
}

fn title_long_enough(value: &str) -> bool {
    char_len(value) >= TITLE_MIN
}

fn title_short_enough(value: &str) -> bool {
    char_len(value) <= TITLE_MAX
}

fn content_short_enough(value: &str) -> bool {
    char_len(value) <= CONTENT_MAX
}

fn known_tag(value: &str) -> bool {
    value.parse::<Tag>().is_ok()
}

pub const TITLE_RULES: &[Rule] = &[
    Rule {
        message: "Required",
        check: present,
    },
    Rule {
        message: "Minimum 3 characters",
        check: title_long_enough,
    },
    Rule {
        message: "Maximum 50 characters",
        check: title_short_enough,
    },
];

pub const CONTENT_RULES: &[Rule] = &[Rule {
    message: "Maximum 500 characters",
    check: content_short_enough,
}];

pub const TAG_RULES: &[Rule] = &[
    Rule {
        message: "Required",
        check: present,
    },
    Rule {
        message: "Invalid tag",
        check: known_tag,
    },
];

/// First failing rule's message, if any
fn first_failure(rules: &[Rule], value: &str) -> Option<&'static str> {
    rules.iter().find(|r| !(r.check)(value)).map(|r| r.message)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Content,
    Tag,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Title => "title",
            Field::Content => "content",
            Field::Tag => "tag",
        })
    }
}

/// Raw values as entered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormValues {
    pub title: String,
    pub content: String,
    pub tag: String,
}

impl Default for FormValues {
    fn default() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            tag: Tag::Todo.as_str().to_string(),
        }
    }
}

/// At most one message per field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub title: Option<&'static str>,
    pub content: Option<&'static str>,
    pub tag: Option<&'static str>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.tag.is_none()
    }

    pub fn get(&self, field: Field) -> Option<&'static str> {
        match field {
            Field::Title => self.title,
            Field::Content => self.content,
            Field::Tag => self.tag,
        }
    }

    /// Only the errors for fields the user has already left or submitted
    fn visible(&self, touched: &[Field]) -> Self {
        let keep = |f: Field, e: Option<&'static str>| e.filter(|_| touched.contains(&f));
        Self {
            title: keep(Field::Title, self.title),
            content: keep(Field::Content, self.content),
            tag: keep(Field::Tag, self.tag),
        }
    }
}

/// Check every field and build the create payload when all pass
pub fn validate(values: &FormValues) -> Result<NewNote, FieldErrors> {
    let errors = FieldErrors {
        title: first_failure(TITLE_RULES, &values.title),
        content: first_failure(CONTENT_RULES, &values.content),
        tag: first_failure(TAG_RULES, &values.tag),
    };
    if !errors.is_empty() {
        return Err(errors);
    }
    let tag = values.tag.parse::<Tag>().map_err(|_| FieldErrors {
        tag: Some("Invalid tag"),
        ..FieldErrors::default()
    })?;
    Ok(NewNote {
        title: values.title.clone(),
        content: values.content.clone(),
        tag,
    })
}

/// Focusable controls, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    Title,
    Content,
    Tag,
    Cancel,
    Submit,
}

impl FormFocus {
    const ORDER: [FormFocus; 5] = [
        FormFocus::Title,
        FormFocus::Content,
        FormFocus::Tag,
        FormFocus::Cancel,
        FormFocus::Submit,
    ];

    fn step(self, forward: bool) -> Self {
        let len = Self::ORDER.len();
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        let next = if forward {
            (idx + 1) % len
        } else {
            (idx + len - 1) % len
        };
        Self::ORDER[next]
    }

    fn field(self) -> Option<Field> {
        match self {
            FormFocus::Title => Some(Field::Title),
            FormFocus::Content => Some(Field::Content),
            FormFocus::Tag => Some(Field::Tag),
            FormFocus::Cancel | FormFocus::Submit => None,
        }
    }
}

/// What the host should do after a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    Submit(NewNote),
    Cancel,
}

pub struct NoteForm {
    pub title: TextArea<'static>,
    pub content: TextArea<'static>,
    pub tag: Tag,
    pub focus: FormFocus,
    touched: Vec<Field>,
    pending: bool,
    failure: Option<String>,
}

impl NoteForm {
    pub fn new() -> Self {
        let mut title = TextArea::default();
        title.set_placeholder_text("3-50 characters");
        let mut content = TextArea::default();
        content.set_placeholder_text("Optional, up to 500 characters");
        Self {
            title,
            content,
            tag: Tag::Todo,
            focus: FormFocus::Title,
            touched: Vec::new(),
            pending: false,
            failure: None,
        }
    }

    pub fn values(&self) -> FormValues {
        FormValues {
            title: self.title.lines().join(""),
            content: self.content.lines().join("\n"),
            tag: self.tag.as_str().to_string(),
        }
    }

    /// Errors to display next to each field
    pub fn errors(&self) -> FieldErrors {
        match validate(&self.values()) {
            Ok(_) => FieldErrors::default(),
            Err(errors) => errors.visible(&self.touched),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.pending {
            "Creating..."
        } else {
            "Create note"
        }
    }

    fn touch(&mut self, field: Field) {
        if !self.touched.contains(&field) {
            self.touched.push(field);
        }
    }

    fn move_focus(&mut self, forward: bool) {
        if let Some(field) = self.focus.field() {
            self.touch(field);
        }
        self.focus = self.focus.step(forward);
    }

    /// Validate everything; on success the form turns pending and yields the payload
    pub fn try_submit(&mut self) -> Option<FormEvent> {
        if self.pending {
            return None;
        }
        self.touch(Field::Title);
        self.touch(Field::Content);
        self.touch(Field::Tag);

        match validate(&self.values()) {
            Ok(note) => {
                self.pending = true;
                self.failure = None;
                Some(FormEvent::Submit(note))
            }
            Err(errors) => {
                // Land on the first field that needs attention
                if errors.title.is_some() {
                    self.focus = FormFocus::Title;
                } else if errors.content.is_some() {
                    self.focus = FormFocus::Content;
                } else {
                    self.focus = FormFocus::Tag;
                }
                None
            }
        }
    }

    /// The create call failed: re-enable submit and keep what was typed
    pub fn submit_failed(&mut self, message: impl Into<String>) {
        self.pending = false;
        self.failure = Some(message.into());
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<FormEvent> {
        match key.code {
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return self.try_submit();
            }
            KeyCode::Tab => {
                self.move_focus(true);
                return None;
            }
            KeyCode::BackTab => {
                self.move_focus(false);
                return None;
            }
            _ => {}
        }

        match self.focus {
            FormFocus::Title => {
                if key.code == KeyCode::Enter {
                    self.move_focus(true);
                } else {
                    self.title.input(key);
                }
            }
            FormFocus::Content => {
                self.content.input(key);
            }
            FormFocus::Tag => match key.code {
                KeyCode::Left | KeyCode::Up => self.tag = self.tag.prev(),
                KeyCode::Right | KeyCode::Down | KeyCode::Char(' ') => self.tag = self.tag.next(),
                KeyCode::Enter => self.move_focus(true),
                _ => {}
            },
            FormFocus::Cancel => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                    return Some(FormEvent::Cancel);
                }
            }
            FormFocus::Submit => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                    return self.try_submit();
                }
            }
        }
        None
    }
}

impl Default for NoteForm {
    fn default() -> Self {
        Self::new()
    }
}
