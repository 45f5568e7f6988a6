//! Stage interface extraction (the `@location` slots an entry point reads or
//! writes).

use naga::{Binding, Handle, Interpolation, Module, Sampling, Type, TypeInner};

/// One user-defined inter-stage slot.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Slot {
    pub location: u32,
    pub ty: TypeInner,
    pub interpolation: Option<Interpolation>,
    pub sampling: Option<Sampling>,
}

impl Slot {
    pub fn describe(&self) -> String {
        format!("@location({}) {}", self.location, describe_type(&self.ty))
    }

    /// The `@interpolate` qualifiers, e.g. `Some(Flat)/None`.
    pub fn describe_interpolation(&self) -> String {
        format!("{:?}/{:?}", self.interpolation, self.sampling)
    }
}

/// Appends the location slots reachable from `ty`/`binding`, descending into
/// unbound structs.
fn collect(module: &Module, ty: Handle<Type>, binding: Option<&Binding>, out: &mut Vec<Slot>) {
    match binding {
        Some(Binding::Location {
            location,
            interpolation,
            sampling,
            ..
        }) => out.push(Slot {
            location: *location,
            ty: module.types[ty].inner.clone(),
            interpolation: *interpolation,
            sampling: *sampling,
        }),
        Some(_) => {}
        None => {
            if let TypeInner::Struct { members, .. } = &module.types[ty].inner {
                for m in members {
                    collect(module, m.ty, m.binding.as_ref(), out);
                }
            }
        }
    }
}

/// Slots consumed by an entry point's arguments.
pub(crate) fn inputs(module: &Module, function: &naga::Function) -> Vec<Slot> {
    let mut out = Vec::new();
    for arg in &function.arguments {
        collect(module, arg.ty, arg.binding.as_ref(), &mut out);
    }
    out.sort_by_key(|s| s.location);
    out
}

/// Slots produced by an entry point's result.
pub(crate) fn outputs(module: &Module, function: &naga::Function) -> Vec<Slot> {
    let mut out = Vec::new();
    if let Some(result) = &function.result {
        collect(module, result.ty, result.binding.as_ref(), &mut out);
    }
    out.sort_by_key(|s| s.location);
    out
}

pub(crate) fn describe_type(ty: &TypeInner) -> String {
    match ty {
        TypeInner::Scalar(s) => scalar_name(*s),
        TypeInner::Vector { size, scalar } => format!("vec{}<{}>", *size as u8, scalar_name(*scalar)),
        other => format!("{other:?}"),
    }
}

fn scalar_name(s: naga::Scalar) -> String {
    let prefix = match s.kind {
        naga::ScalarKind::Float => "f",
        naga::ScalarKind::Sint => "i",
        naga::ScalarKind::Uint => "u",
        naga::ScalarKind::Bool => return "bool".to_string(),
        _ => return format!("{:?}", s.kind),
    };
    format!("{prefix}{}", u32::from(s.width) * 8)
}
