//! The static operation descriptor table.
//!
//! Each provider operation is described once: the capability it needs,
//! whether it mutates the store, and which dynamic parameters are required
//! or meaningful. The engine consults the table before dispatching, so a
//! request with a missing mandatory parameter is rejected before any store
//! access — no reflection, no attribute machinery.

use crate::capability::Capability;
use crate::error::{NavError, Result};
use crate::params::OpParams;

/// Every operation the engine dispatches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    GetItem,
    SetItem,
    ClearItem,
    ItemExists,
    NewItem,
    RemoveItem,
    RenameItem,
    CopyItem,
    GetChildItems,
    GetChildNames,
    HasChildItems,
    MoveItem,
    IsContainer,
    MakePath,
    ParentPath,
    ChildName,
    GetItemProperty,
    SetItemProperty,
    ClearItemProperty,
    Mount,
    Unmount,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.descriptor().name)
    }
}

impl Operation {
    /// The descriptor row for this operation.
    pub fn descriptor(&self) -> &'static OpDescriptor {
        descriptor(*self)
    }

    /// Parse an operation from its hyphenated name.
    pub fn parse(name: &str) -> Option<Self> {
        DESCRIPTORS
            .iter()
            .find(|d| d.name == name)
            .map(|d| d.operation)
    }
}

/// A dynamic parameter slot an operation may require or accept.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Param {
    Namespace,
    Recurse,
    Force,
    ItemKind,
    NewName,
    Destination,
    Value,
    Location,
    Format,
}

/// One row of the descriptor table.
#[derive(Debug)]
pub struct OpDescriptor {
    /// The operation this row describes.
    pub operation: Operation,
    /// Hyphenated operation name, used in traces and confirmations.
    pub name: &'static str,
    /// The capability the engine must support to dispatch this operation.
    pub capability: Capability,
    /// `true` when the operation mutates the backing store.
    pub mutates: bool,
    /// Parameters that must be present.
    pub required: &'static [Param],
    /// Parameters that are consulted when present.
    pub optional: &'static [Param],
}

/// The descriptor table. One row per operation; order is insignificant.
pub const DESCRIPTORS: &[OpDescriptor] = &[
    OpDescriptor {
        operation: Operation::GetItem,
        name: "get-item",
        capability: Capability::Item,
        mutates: false,
        required: &[],
        optional: &[Param::Namespace],
    },
    OpDescriptor {
        operation: Operation::SetItem,
        name: "set-item",
        capability: Capability::Item,
        mutates: true,
        required: &[Param::Value],
        optional: &[Param::Namespace],
    },
    OpDescriptor {
        operation: Operation::ClearItem,
        name: "clear-item",
        capability: Capability::Item,
        mutates: true,
        required: &[],
        optional: &[Param::Namespace],
    },
    OpDescriptor {
        operation: Operation::ItemExists,
        name: "test-path",
        capability: Capability::Item,
        mutates: false,
        required: &[],
        optional: &[Param::Namespace],
    },
    OpDescriptor {
        operation: Operation::NewItem,
        name: "new-item",
        capability: Capability::Container,
        mutates: true,
        required: &[Param::ItemKind],
        optional: &[Param::Namespace, Param::Force],
    },
    OpDescriptor {
        operation: Operation::RemoveItem,
        name: "remove-item",
        capability: Capability::Container,
        mutates: true,
        required: &[],
        optional: &[Param::Namespace, Param::Recurse],
    },
    OpDescriptor {
        operation: Operation::RenameItem,
        name: "rename-item",
        capability: Capability::Container,
        mutates: true,
        required: &[Param::NewName],
        optional: &[Param::Namespace],
    },
    OpDescriptor {
        operation: Operation::CopyItem,
        name: "copy-item",
        capability: Capability::Container,
        mutates: true,
        required: &[Param::Destination],
        optional: &[Param::Namespace, Param::Recurse],
    },
    OpDescriptor {
        operation: Operation::GetChildItems,
        name: "get-childitem",
        capability: Capability::Container,
        mutates: false,
        required: &[],
        optional: &[Param::Namespace, Param::Recurse],
    },
    OpDescriptor {
        operation: Operation::GetChildNames,
        name: "get-childnames",
        capability: Capability::Container,
        mutates: false,
        required: &[],
        optional: &[Param::Namespace],
    },
    OpDescriptor {
        operation: Operation::HasChildItems,
        name: "has-childitems",
        capability: Capability::Container,
        mutates: false,
        required: &[],
        optional: &[Param::Namespace],
    },
    OpDescriptor {
        operation: Operation::MoveItem,
        name: "move-item",
        capability: Capability::Navigation,
        mutates: true,
        required: &[Param::Destination],
        optional: &[Param::Namespace],
    },
    OpDescriptor {
        operation: Operation::IsContainer,
        name: "is-container",
        capability: Capability::Navigation,
        mutates: false,
        required: &[],
        optional: &[Param::Namespace],
    },
    OpDescriptor {
        operation: Operation::MakePath,
        name: "combine-path",
        capability: Capability::Navigation,
        mutates: false,
        required: &[],
        optional: &[],
    },
    OpDescriptor {
        operation: Operation::ParentPath,
        name: "parent-path",
        capability: Capability::Navigation,
        mutates: false,
        required: &[],
        optional: &[],
    },
    OpDescriptor {
        operation: Operation::ChildName,
        name: "child-name",
        capability: Capability::Navigation,
        mutates: false,
        required: &[],
        optional: &[],
    },
    OpDescriptor {
        operation: Operation::GetItemProperty,
        name: "get-itemproperty",
        capability: Capability::Property,
        mutates: false,
        required: &[],
        optional: &[Param::Namespace],
    },
    OpDescriptor {
        operation: Operation::SetItemProperty,
        name: "set-itemproperty",
        capability: Capability::Property,
        mutates: true,
        required: &[],
        optional: &[Param::Namespace],
    },
    OpDescriptor {
        operation: Operation::ClearItemProperty,
        name: "clear-itemproperty",
        capability: Capability::Property,
        mutates: true,
        required: &[],
        optional: &[Param::Namespace],
    },
    OpDescriptor {
        operation: Operation::Mount,
        name: "new-drive",
        capability: Capability::Drive,
        mutates: false,
        required: &[Param::Location],
        optional: &[Param::Format],
    },
    OpDescriptor {
        operation: Operation::Unmount,
        name: "remove-drive",
        capability: Capability::Drive,
        mutates: false,
        required: &[],
        optional: &[],
    },
];

/// Look up the descriptor row for an operation.
pub fn descriptor(operation: Operation) -> &'static OpDescriptor {
    DESCRIPTORS
        .iter()
        .find(|d| d.operation == operation)
        .expect("every operation has a descriptor row")
}

/// Check a parameter set against a descriptor's required list.
///
/// Boolean and format parameters always carry a value, so only the
/// optional-typed slots can actually be missing.
pub fn check_params(desc: &OpDescriptor, params: &OpParams) -> Result<()> {
    for param in desc.required {
        match param {
            Param::ItemKind if params.item_kind.is_none() => {
                return Err(NavError::MissingParameter { name: "itemType" });
            }
            Param::NewName if params.new_name.is_none() => {
                return Err(NavError::MissingParameter { name: "newName" });
            }
            Param::Destination if params.destination.is_none() => {
                return Err(NavError::MissingParameter { name: "destination" });
            }
            Param::Location if params.location.is_none() => {
                return Err(NavError::MissingParameter { name: "path" });
            }
            Param::Value if params.value.is_none() => {
                return Err(NavError::MissingValue);
            }
            _ => {}
        }
    }
    Ok(())
}
