use super::function_block::type_name_for;
use super::interface::{CONFIRM_EVENT, PLUG_NAME, REQUEST_EVENT, SOCKET_NAME, capitalize};
use super::types::classify;
use super::xml::{element, push_child};
use crate::radio::Block;
use ahash::{AHashMap, AHashSet};
use tracing::{debug, warn};
use xmltree::Element;

/// Tag of the network element in generated and host documents.
pub const NETWORK_TAG: &str = "SubAppNetwork";
pub const NETWORK_FILE: &str = "fbn_gen.sys";

/// Occurrence count per function block type plus every instance name handed out,
/// used to derive unique instance names.
#[derive(Debug, Clone, Default)]
pub struct NameCounters {
    counts: AHashMap<String, usize>,
    taken: AHashSet<String>,
}

impl NameCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of instances named so far for `type_name`.
    pub fn count(&self, type_name: &str) -> usize {
        self.counts.get(type_name).copied().unwrap_or(0)
    }

    pub fn is_taken(&self, name: &str) -> bool {
        self.taken.contains(name)
    }
}

/// Deterministic diagonal placement of instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub origin_x: i64,
    pub origin_y: i64,
    pub step: i64,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            origin_x: 500,
            origin_y: 1400,
            step: 10,
        }
    }
}

/// A `Name`/`Value` pair of an instance, value already rendered as an IEC literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkParameter {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkInstance {
    pub name: String,
    pub type_name: String,
    pub parameters: Vec<NetworkParameter>,
    pub x: i64,
    pub y: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortConnection {
    pub source: String,
    pub destination: String,
}

/// An assembled network of function block instances.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionBlockNetwork {
    pub instances: Vec<NetworkInstance>,
    pub adapter_connections: Vec<PortConnection>,
    /// `CNF -> REQ` wiring mirroring the adapter connections. Not rendered: event
    /// sequencing is left to the host's scheduler.
    pub event_connections: Vec<PortConnection>,
}

impl FunctionBlockNetwork {
    pub fn instance(&self, name: &str) -> Option<&NetworkInstance> {
        self.instances.iter().find(|i| i.name == name)
    }

    pub fn to_element(&self) -> Element {
        let mut network = element(NETWORK_TAG, &[]);

        for instance in &self.instances {
            let x = instance.x.to_string();
            let y = instance.y.to_string();
            let mut fb = element(
                "FB",
                &[("Name", &instance.name), ("Type", &instance.type_name), ("x", &x), ("y", &y)],
            );
            for parameter in &instance.parameters {
                push_child(
                    &mut fb,
                    element("Parameter", &[("Name", &parameter.name), ("Value", &parameter.value)]),
                );
            }
            push_child(&mut network, fb);
        }

        let mut connections = element("AdapterConnections", &[]);
        for connection in &self.adapter_connections {
            push_child(
                &mut connections,
                element(
                    "Connection",
                    &[("Source", &connection.source), ("Destination", &connection.destination)],
                ),
            );
        }
        push_child(&mut network, connections);

        network
    }
}

/// Renders a raw parameter value as it appears in a network `Parameter`: numbers and
/// booleans verbatim, everything else as a single-quoted string literal.
pub fn parameter_literal(raw: &str) -> String {
    let (kind, _) = classify(raw);
    if kind.is_literal() {
        raw.to_string()
    } else {
        format!("'{}'", raw)
    }
}

/// Returns the next instance name for `base` under `type_name`: the first occurrence
/// keeps `base`, later ones get `_2`, `_3`, ... A candidate already handed out is
/// skipped by bumping the counter, so no two instances ever share a name.
pub fn unique_instance_name(counters: &mut NameCounters, base: &str, type_name: &str) -> String {
    let count = counters.counts.entry(type_name.to_string()).or_insert(0);
    *count += 1;
    let mut name = if *count > 1 {
        format!("{}_{}", base, count)
    } else {
        base.to_string()
    };
    while counters.taken.contains(&name) {
        *count += 1;
        name = format!("{}_{}", base, count);
    }
    counters.taken.insert(name.clone());
    name
}

/// Builds the function block network mirroring a flow graph.
#[derive(Debug, Clone)]
pub struct NetworkAssembler {
    layout: Layout,
    package: String,
}

impl NetworkAssembler {
    pub fn new(layout: Layout, package: &str) -> Self {
        Self {
            layout,
            package: package.to_string(),
        }
    }

    /// Instantiates every block whose type was emitted, then wires one adapter
    /// connection per flow graph connection between instantiated blocks.
    pub fn assemble(
        &self,
        blocks: &[Block],
        emitted_types: &[String],
        counters: &mut NameCounters,
    ) -> FunctionBlockNetwork {
        let emitted: AHashSet<&str> = emitted_types.iter().map(String::as_str).collect();
        let mut network = FunctionBlockNetwork::default();
        let mut instance_names: AHashMap<&str, String> = AHashMap::new();
        let (mut x, mut y) = (self.layout.origin_x, self.layout.origin_y);

        for block in blocks {
            let type_name = type_name_for(&block.id);
            if !emitted.contains(type_name.as_str()) {
                debug!(block = %block.name, "No emitted type, skipping instance");
                continue;
            }

            let name = unique_instance_name(counters, &block.name, &type_name);
            let parameters = block
                .parameters
                .iter()
                .map(|(key, raw)| NetworkParameter {
                    name: capitalize(key),
                    value: parameter_literal(raw),
                })
                .collect();

            debug!(instance = %name, fb_type = %type_name, x, y, "Placed instance");
            instance_names.insert(block.name.as_str(), name.clone());
            network.instances.push(NetworkInstance {
                name,
                type_name: format!("{}::{}", self.package, type_name),
                parameters,
                x,
                y,
            });
            x += self.layout.step;
            y += self.layout.step;
        }

        for block in blocks {
            for connection in &block.connections {
                let (Some(src), Some(dst)) = (
                    instance_names.get(connection.src.as_str()),
                    instance_names.get(connection.dst.as_str()),
                ) else {
                    warn!(
                        src = %connection.src,
                        dst = %connection.dst,
                        "Connection endpoint has no instance, not wired"
                    );
                    continue;
                };

                network.adapter_connections.push(PortConnection {
                    source: format!("{}.{}", src, PLUG_NAME),
                    destination: format!("{}.{}", dst, SOCKET_NAME),
                });
                network.event_connections.push(PortConnection {
                    source: format!("{}.{}", src, CONFIRM_EVENT),
                    destination: format!("{}.{}", dst, REQUEST_EVENT),
                });
            }
        }

        network
    }
}
