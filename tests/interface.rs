//! Tests for function block interface synthesis.
mod common;
use common::*;
use radio2diac::diac::{
    ADAPTER_BINDING, Binding, CONFIRM_EVENT, IecType, InterfaceList, ParameterValue, PayloadKind, REQUEST_EVENT,
    TypedParameter, capitalize, synthesize_interface,
};

fn typed(name: &str, raw: &str, kind: IecType) -> TypedParameter {
    TypedParameter {
        name: name.to_string(),
        value: ParameterValue::Text(raw.to_string()),
        kind,
    }
}

fn sample_parameters() -> Vec<TypedParameter> {
    vec![
        typed("samp_rate", "32e3", IecType::Real),
        typed("waveform", "analog.GR_COS_WAVE", IecType::String),
    ]
}

fn bindings(interface: &InterfaceList, event: &str) -> Vec<Binding> {
    interface.event(event).expect("event declared").with.clone()
}

#[test]
fn test_parameters_become_commented_input_vars() {
    let interface = synthesize_interface(&sample_parameters(), false, false, PayloadKind::Real, "gnu_radio");

    let vars: Vec<(&str, &str)> = interface
        .input_vars
        .iter()
        .map(|v| (v.name.as_str(), v.type_name.as_str()))
        .collect();
    assert_eq!(vars, vec![("Samp_rate", "REAL"), ("Waveform", "STRING")]);
    assert_eq!(
        interface.input_vars[0].comment.as_deref(),
        Some("Input parameter samp_rate")
    );
    assert!(interface.output_vars.is_empty());
}

#[test]
fn test_complex_parameter_uses_package_type() {
    let params = vec![typed("item", "COMPLEX", IecType::Complex)];
    let interface = synthesize_interface(&params, false, false, PayloadKind::Real, "dsp");
    assert_eq!(interface.input_vars[0].type_name, "dsp::COMPLEX");
}

#[test]
fn test_producer_gets_plug_bound_to_confirm() {
    let interface = synthesize_interface(&sample_parameters(), false, true, PayloadKind::Complex, "gnu_radio");

    assert!(interface.socket.is_none());
    let plug = interface.plug.as_ref().expect("plug");
    assert_eq!(plug.name, "DataOut");
    assert_eq!(plug.type_name, "gnu_radio::GenericAdapter_COMPLEX");

    assert_eq!(
        bindings(&interface, REQUEST_EVENT),
        vec![
            Binding::Variable("Samp_rate".to_string()),
            Binding::Variable("Waveform".to_string()),
        ]
    );
    assert_eq!(
        bindings(&interface, CONFIRM_EVENT),
        vec![Binding::Adapter(ADAPTER_BINDING.to_string())]
    );
}

#[test]
fn test_consumer_gets_socket_bound_to_request() {
    let interface = synthesize_interface(&sample_parameters(), true, false, PayloadKind::Real, "gnu_radio");

    assert!(interface.plug.is_none());
    let socket = interface.socket.as_ref().expect("socket");
    assert_eq!(socket.name, "DataIn");
    assert_eq!(socket.type_name, "gnu_radio::GenericAdapter_REAL");

    let request = bindings(&interface, REQUEST_EVENT);
    assert_eq!(request.last(), Some(&Binding::Adapter("Data".to_string())));
    assert_eq!(request.len(), 3);
    assert!(bindings(&interface, CONFIRM_EVENT).is_empty());
}

#[test]
fn test_bind_ignores_duplicates_and_unknown_events() {
    let mut interface = synthesize_interface(&[], true, true, PayloadKind::Real, "gnu_radio");

    assert!(interface.bind(REQUEST_EVENT, Binding::Adapter("Data".to_string())));
    assert_eq!(bindings(&interface, REQUEST_EVENT).len(), 1);
    assert!(!interface.bind("IND", Binding::Variable("X".to_string())));
}

#[test]
fn test_synthesis_is_deterministic() {
    let a = synthesize_interface(&sample_parameters(), true, true, PayloadKind::Complex, "gnu_radio");
    let b = synthesize_interface(&sample_parameters(), true, true, PayloadKind::Complex, "gnu_radio");
    assert_eq!(a, b);
}

#[test]
fn test_interface_renders_sections_in_order() {
    let interface = synthesize_interface(&sample_parameters(), true, false, PayloadKind::Real, "gnu_radio");
    let elem = interface.to_element();

    assert_eq!(elem.name, "InterfaceList");
    assert_eq!(
        child_names(&elem),
        vec!["EventInputs", "EventOutputs", "InputVars", "Sockets"]
    );

    let request = elem
        .get_child("EventInputs")
        .and_then(|inputs| inputs.get_child("Event"))
        .expect("REQ event");
    assert_eq!(attr(request, "Name"), "REQ");
    assert_eq!(attr(request, "Type"), "Event");
    // Only variable bindings are written as <With>.
    let with: Vec<&str> = element_children(request).iter().map(|w| attr(w, "Var")).collect();
    assert_eq!(with, vec!["Samp_rate", "Waveform"]);

    let socket = elem
        .get_child("Sockets")
        .and_then(|s| s.get_child("AdapterDeclaration"))
        .expect("socket declaration");
    assert_eq!(attr(socket, "Name"), "DataIn");
    assert_eq!(attr(socket, "Type"), "gnu_radio::GenericAdapter_REAL");
}

#[test]
fn test_capitalize_matches_grc_naming() {
    assert_eq!(capitalize("samp_rate"), "Samp_rate");
    assert_eq!(capitalize("fftSize"), "Fftsize");
    assert_eq!(capitalize("AMP"), "Amp");
    assert_eq!(capitalize(""), "");
}

#[test]
fn test_colliding_parameter_names_are_all_declared() {
    let params = vec![
        typed("freq", "1000", IecType::Int),
        typed("Freq", "2e3", IecType::Real),
    ];
    let interface = synthesize_interface(&params, false, false, PayloadKind::Real, "gnu_radio");

    let vars: Vec<(&str, &str)> = interface
        .input_vars
        .iter()
        .map(|v| (v.name.as_str(), v.comment.as_deref().unwrap_or_default()))
        .collect();
    assert_eq!(
        vars,
        vec![("Freq", "Input parameter freq"), ("Freq", "Input parameter Freq")]
    );
    // Binding the folded name twice is a no-op.
    assert_eq!(
        bindings(&interface, REQUEST_EVENT),
        vec![Binding::Variable("Freq".to_string())]
    );
}
