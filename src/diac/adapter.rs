//! Shared type documents: the COMPLEX structured type and the generic adapters.

use super::function_block::{ADAPTER_STANDARD, FB_STANDARD, MetaData};
use super::interface::{Binding, CONFIRM_EVENT, Event, InterfaceList, VarDeclaration};
use super::types::{IecType, PayloadKind};
use super::xml::{element, push_child};
use xmltree::Element;

/// Upper bound of the sample buffer carried by an adapter's confirmation data.
pub const MAX_ARRAY_SIZE: usize = 4096;

pub const COMPLEX_TYPE_FILE: &str = "COMPLEX.dtp";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceInterface {
    Socket,
    Plug,
}

impl ServiceInterface {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceInterface::Socket => "SOCKET",
            ServiceInterface::Plug => "PLUG",
        }
    }
}

/// One side of a service transaction: which end fires which event with which data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServicePrimitive {
    pub interface: ServiceInterface,
    pub event: String,
    pub parameters: String,
}

impl ServicePrimitive {
    pub fn new(interface: ServiceInterface, event: &str, parameters: &str) -> Self {
        Self {
            interface,
            event: event.to_string(),
            parameters: parameters.to_string(),
        }
    }

    fn to_element(&self, tag: &str) -> Element {
        element(
            tag,
            &[
                ("Interface", self.interface.as_str()),
                ("Event", &self.event),
                ("Parameters", &self.parameters),
            ],
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSequence {
    pub name: String,
    pub transactions: Vec<(ServicePrimitive, ServicePrimitive)>,
}

/// A generated adapter type.
#[derive(Debug, Clone, PartialEq)]
pub struct AdapterType {
    pub name: String,
    pub comment: String,
    pub meta_data: MetaData,
    pub interface: InterfaceList,
    pub services: Vec<ServiceSequence>,
}

impl AdapterType {
    /// The generic request/confirm adapter carrying samples of `kind`.
    pub fn generic(kind: PayloadKind, meta_data: &MetaData) -> Self {
        use ServiceInterface::{Plug, Socket};

        let data_type = kind.iec_type().qualified_name(&meta_data.package_name);
        let mut confirm = Event::new(CONFIRM_EVENT, None);
        confirm.with.push(Binding::Variable("CNFD".to_string()));

        let interface = InterfaceList {
            event_outputs: vec![confirm],
            output_vars: vec![
                VarDeclaration::new("CNFD", data_type)
                    .with_array_size(format!("0..{}", MAX_ARRAY_SIZE))
                    .with_comment("Confirmation Data from Plug"),
            ],
            ..Default::default()
        };

        let services = vec![
            ServiceSequence {
                name: "request_confirm".to_string(),
                transactions: vec![
                    (
                        ServicePrimitive::new(Socket, "REQ", "REQD"),
                        ServicePrimitive::new(Plug, "REQ", "REQD"),
                    ),
                    (
                        ServicePrimitive::new(Plug, "CNF", "CNFD"),
                        ServicePrimitive::new(Socket, "CNF", "CNFD"),
                    ),
                ],
            },
            ServiceSequence {
                name: "indication_response".to_string(),
                transactions: vec![
                    (
                        ServicePrimitive::new(Plug, "IND", "INDD"),
                        ServicePrimitive::new(Socket, "IND", "INDD"),
                    ),
                    (
                        ServicePrimitive::new(Socket, "RSP", "RSPD"),
                        ServicePrimitive::new(Plug, "RSP", "RSPD"),
                    ),
                ],
            },
        ];

        Self {
            name: kind.adapter_name(),
            comment: "Generic Adapter for GNU Radio".to_string(),
            meta_data: meta_data.for_standard(ADAPTER_STANDARD),
            interface,
            services,
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.adp", self.name)
    }

    pub fn to_element(&self) -> Element {
        let mut adapter = element("AdapterType", &[("Name", &self.name), ("Comment", &self.comment)]);
        self.meta_data.append_to(&mut adapter);
        push_child(&mut adapter, self.interface.to_element());

        let mut service = element(
            "Service",
            &[
                ("RightInterface", ServiceInterface::Socket.as_str()),
                ("LeftInterface", ServiceInterface::Plug.as_str()),
                ("Comment", "Adapter Interface"),
            ],
        );
        for sequence in &self.services {
            let mut sequence_elem = element("ServiceSequence", &[("Name", &sequence.name)]);
            for (input, output) in &sequence.transactions {
                let mut transaction = element("ServiceTransaction", &[]);
                push_child(&mut transaction, input.to_element("InputPrimitive"));
                push_child(&mut transaction, output.to_element("OutputPrimitive"));
                push_child(&mut sequence_elem, transaction);
            }
            push_child(&mut service, sequence_elem);
        }
        push_child(&mut adapter, service);

        adapter
    }
}

/// The `COMPLEX` structured data type: a pair of REAL members `Re` and `Im`.
pub fn complex_data_type(meta_data: &MetaData) -> Element {
    let mut data_type = element(
        "DataType",
        &[("Name", IecType::Complex.as_str()), ("Comment", "Complex data type for GNU Radio")],
    );
    meta_data.for_standard(FB_STANDARD).append_to(&mut data_type);

    let mut structured = element("StructuredType", &[]);
    for member in ["Re", "Im"] {
        push_child(&mut structured, VarDeclaration::new(member, IecType::Real.as_str()).to_element());
    }
    push_child(&mut data_type, structured);

    data_type
}
