//! Positional argument parsing: `type/name`, `type name...`, `type1,type2`.

use crate::error::InputError;

/// One lookup against the object store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// A single named object of a type
    Named { resource: String, name: String },
    /// Every object of a type in scope
    All { resource: String },
}

impl Selector {
    pub fn resource(&self) -> &str {
        match self {
            Selector::Named { resource, .. } | Selector::All { resource } => resource,
        }
    }
}

/// Parse positional tokens into selectors, preserving order.
///
/// Either every token is `type/name`, or the first token is a comma-separated
/// type list followed by names.
pub fn parse_selectors(args: &[String]) -> Result<Vec<Selector>, InputError> {
    let args: Vec<&str> = args
        .iter()
        .map(|a| a.trim())
        .filter(|a| !a.is_empty())
        .collect();
    let Some((first, rest)) = args.split_first() else {
        return Err(InputError::InvalidArguments(
            "you must specify the type of resource to get".to_string(),
        ));
    };

    if args.iter().any(|a| a.contains('/')) {
        return args.iter().map(|a| parse_slash_form(a)).collect();
    }

    let resources: Vec<&str> = first.split(',').map(str::trim).collect();
    if resources.iter().any(|r| r.is_empty()) {
        return Err(InputError::InvalidArguments(format!(
            "invalid resource type list {:?}",
            first
        )));
    }

    if rest.is_empty() {
        return Ok(resources
            .into_iter()
            .map(|resource| Selector::All {
                resource: resource.to_string(),
            })
            .collect());
    }

    let mut selectors = Vec::with_capacity(resources.len() * rest.len());
    for resource in &resources {
        for name in rest {
            selectors.push(Selector::Named {
                resource: resource.to_string(),
                name: name.to_string(),
            });
        }
    }
    Ok(selectors)
}

fn parse_slash_form(arg: &str) -> Result<Selector, InputError> {
    let Some((resource, name)) = arg.split_once('/') else {
        return Err(InputError::InvalidArguments(format!(
            "there is no need to specify a resource type as a separate argument when passing \
             arguments in resource/name form (e.g. 'kubehello hello resource/<resource_name>' \
             instead of 'kubehello hello resource resource/<resource_name>'): {:?}",
            arg
        )));
    };
    if resource.is_empty() || name.is_empty() || name.contains('/') {
        return Err(InputError::InvalidArguments(format!(
            "arguments in resource/name form must have a single resource and name: {:?}",
            arg
        )));
    }
    Ok(Selector::Named {
        resource: resource.to_string(),
        name: name.to_string(),
    })
}
