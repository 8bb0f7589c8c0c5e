use super::types::{PayloadKind, TypedParameter};
use super::xml::{element, push_child};
use ahash::AHashSet;
use tracing::warn;
use xmltree::Element;

pub const REQUEST_EVENT: &str = "REQ";
pub const CONFIRM_EVENT: &str = "CNF";
pub const SOCKET_NAME: &str = "DataIn";
pub const PLUG_NAME: &str = "DataOut";
/// Name under which a block's adapter is bound to its events.
pub const ADAPTER_BINDING: &str = "Data";

/// What an event carries when it fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    Variable(String),
    Adapter(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub name: String,
    pub comment: Option<String>,
    pub with: Vec<Binding>,
}

impl Event {
    pub fn new(name: &str, comment: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            comment: comment.map(str::to_string),
            with: Vec::new(),
        }
    }

    fn to_element(&self) -> Element {
        let mut event = element("Event", &[("Name", &self.name), ("Type", "Event")]);
        if let Some(comment) = &self.comment {
            event.attributes.insert("Comment".to_string(), comment.clone());
        }
        for binding in &self.with {
            match binding {
                Binding::Variable(var) => push_child(&mut event, element("With", &[("Var", var)])),
                // Adapters carry their own events; 4diac rejects them in <With>.
                Binding::Adapter(_) => {}
            }
        }
        event
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarDeclaration {
    pub name: String,
    pub type_name: String,
    pub array_size: Option<String>,
    pub comment: Option<String>,
}

impl VarDeclaration {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            array_size: None,
            comment: None,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_array_size(mut self, size: impl Into<String>) -> Self {
        self.array_size = Some(size.into());
        self
    }

    pub fn to_element(&self) -> Element {
        let mut decl = element("VarDeclaration", &[("Name", &self.name), ("Type", &self.type_name)]);
        if let Some(size) = &self.array_size {
            decl.attributes.insert("ArraySize".to_string(), size.clone());
        }
        if let Some(comment) = &self.comment {
            decl.attributes.insert("Comment".to_string(), comment.clone());
        }
        decl
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterDeclaration {
    pub name: String,
    pub type_name: String,
    pub comment: Option<String>,
}

impl AdapterDeclaration {
    fn to_element(&self) -> Element {
        let mut decl = element(
            "AdapterDeclaration",
            &[("Name", &self.name), ("Type", &self.type_name)],
        );
        if let Some(comment) = &self.comment {
            decl.attributes.insert("Comment".to_string(), comment.clone());
        }
        decl
    }
}

/// The formal interface of a function block or adapter type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterfaceList {
    pub event_inputs: Vec<Event>,
    pub event_outputs: Vec<Event>,
    pub input_vars: Vec<VarDeclaration>,
    pub output_vars: Vec<VarDeclaration>,
    pub socket: Option<AdapterDeclaration>,
    pub plug: Option<AdapterDeclaration>,
}

impl InterfaceList {
    pub fn event(&self, name: &str) -> Option<&Event> {
        self.event_inputs
            .iter()
            .chain(self.event_outputs.iter())
            .find(|e| e.name == name)
    }

    /// Binds a variable or adapter to the named event. Binding the same name twice to
    /// one event is a no-op; returns `false` if the event does not exist.
    pub fn bind(&mut self, event_name: &str, binding: Binding) -> bool {
        let event = self
            .event_inputs
            .iter_mut()
            .chain(self.event_outputs.iter_mut())
            .find(|e| e.name == event_name);
        match event {
            Some(event) => {
                if !event.with.contains(&binding) {
                    event.with.push(binding);
                }
                true
            }
            None => false,
        }
    }

    /// Renders the `<InterfaceList>`, omitting empty sections.
    pub fn to_element(&self) -> Element {
        let mut list = element("InterfaceList", &[]);

        let mut section = |name: &str, items: Vec<Element>| {
            if !items.is_empty() {
                let mut container = element(name, &[]);
                for item in items {
                    push_child(&mut container, item);
                }
                push_child(&mut list, container);
            }
        };

        section("EventInputs", self.event_inputs.iter().map(Event::to_element).collect());
        section("EventOutputs", self.event_outputs.iter().map(Event::to_element).collect());
        section("InputVars", self.input_vars.iter().map(VarDeclaration::to_element).collect());
        section("OutputVars", self.output_vars.iter().map(VarDeclaration::to_element).collect());
        section("Sockets", self.socket.iter().map(AdapterDeclaration::to_element).collect());
        section("Plugs", self.plug.iter().map(AdapterDeclaration::to_element).collect());

        list
    }
}

/// Capitalizes like GNU Radio's Python tooling: first character upper-cased, the rest
/// lower-cased (`samp_rate` -> `Samp_rate`, `fftSize` -> `Fftsize`).
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Synthesizes the interface of one block's function block type.
///
/// Every parameter becomes an input variable bound to `REQ`. A block that consumes
/// data gets a `DataIn` socket, a block that produces data a `DataOut` plug, both typed
/// to the generic adapter of the block's payload kind. Parameters whose capitalized
/// names coincide (`freq`, `Freq`) are all declared and logged as a warning.
pub fn synthesize_interface(
    parameters: &[TypedParameter],
    has_inputs: bool,
    has_outputs: bool,
    payload: PayloadKind,
    package: &str,
) -> InterfaceList {
    let adapter_type = format!("{}::{}", package, payload.adapter_name());

    let mut interface = InterfaceList {
        event_inputs: vec![Event::new(REQUEST_EVENT, Some("Normal Execution Request"))],
        event_outputs: vec![Event::new(CONFIRM_EVENT, Some("Execution Confirmation"))],
        ..Default::default()
    };

    let mut declared: AHashSet<String> = AHashSet::new();
    for parameter in parameters {
        let name = capitalize(&parameter.name);
        if !declared.insert(name.clone()) {
            warn!(
                parameter = %parameter.name,
                variable = %name,
                "Parameter folds onto an existing input variable name"
            );
        }
        interface.input_vars.push(
            VarDeclaration::new(name, parameter.kind.qualified_name(package))
                .with_comment(format!("Input parameter {}", parameter.name)),
        );
    }

    if has_inputs {
        interface.socket = Some(AdapterDeclaration {
            name: SOCKET_NAME.to_string(),
            type_name: adapter_type.clone(),
            comment: Some("Socket for Adapter".to_string()),
        });
    }
    if has_outputs {
        interface.plug = Some(AdapterDeclaration {
            name: PLUG_NAME.to_string(),
            type_name: adapter_type,
            comment: Some("Plug for Adapter".to_string()),
        });
    }

    let input_names: Vec<String> = interface.input_vars.iter().map(|v| v.name.clone()).collect();
    for name in input_names {
        interface.bind(REQUEST_EVENT, Binding::Variable(name));
    }
    if interface.socket.is_some() {
        interface.bind(REQUEST_EVENT, Binding::Adapter(ADAPTER_BINDING.to_string()));
    }

    let output_names: Vec<String> = interface.output_vars.iter().map(|v| v.name.clone()).collect();
    for name in output_names {
        interface.bind(CONFIRM_EVENT, Binding::Variable(name));
    }
    if interface.plug.is_some() {
        interface.bind(CONFIRM_EVENT, Binding::Adapter(ADAPTER_BINDING.to_string()));
    }

    interface
}
