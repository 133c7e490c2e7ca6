//! The [`NavigationEngine`]: the provider core.

use canopy_drive::{DriveContext, DriveSet};
use canopy_path::{is_well_formed, join, leaf_name, normalize, parent_path, segments, split_drive};
use canopy_tree::{BackingStore, NodeId, NodeKind, NodeValue, TreeDocument};
use tracing::{debug, warn};

use crate::capability::CapabilitySet;
use crate::confirm::{AcceptAll, ShouldProcess};
use crate::descriptor::{check_params, descriptor, OpDescriptor, Operation};
use crate::error::{NavError, Result};
use crate::item::{ErrorRecord, ItemRecord, OperationOutput};
use crate::params::OpParams;

/// The navigation engine: resolves paths against mounted drives and
/// executes provider operations.
///
/// An engine is composed from three parts: the [`DriveSet`] it resolves
/// drive prefixes against, an injected [`ShouldProcess`] confirmation
/// callback consulted once per affected node before any mutation, and the
/// [`CapabilitySet`] naming which operation families it supports.
///
/// Operations run one at a time (`&mut self`); the caller serializes
/// access per drive.
pub struct NavigationEngine {
    drives: DriveSet,
    confirm: Box<dyn ShouldProcess>,
    capabilities: CapabilitySet,
}

impl NavigationEngine {
    /// An engine with every capability that confirms every mutation.
    pub fn new() -> Self {
        Self::with(Box::new(AcceptAll), CapabilitySet::all())
    }

    /// An engine with an explicit confirmation callback and capability set.
    pub fn with(confirm: Box<dyn ShouldProcess>, capabilities: CapabilitySet) -> Self {
        Self {
            drives: DriveSet::new(),
            confirm,
            capabilities,
        }
    }

    /// The mounted drives.
    pub fn drives(&self) -> &DriveSet {
        &self.drives
    }

    /// The mounted drives, mutably. Content streams attach through this.
    pub fn drives_mut(&mut self) -> &mut DriveSet {
        &mut self.drives
    }

    /// Borrow a mounted drive by name.
    pub fn drive(&self, name: &str) -> Option<&DriveContext> {
        self.drives.get(name)
    }

    // -----------------------------------------------------------------------
    // Drive operations
    // -----------------------------------------------------------------------

    /// Mount a backing store under a drive name.
    ///
    /// The durable location is the mandatory `path` dynamic parameter
    /// ([`OpParams::location`]); [`OpParams::format`] selects the durable
    /// form.
    pub fn mount(&mut self, drive: &str, params: &OpParams) -> Result<()> {
        self.prepare(Operation::Mount, drive, params)?;
        let location = params
            .location
            .as_ref()
            .ok_or(NavError::MissingParameter { name: "path" })?;
        self.drives.mount(drive, location, params.format)?;
        Ok(())
    }

    /// Unmount a drive: flush its store to the durable location, then
    /// release the context.
    pub fn unmount(&mut self, drive: &str) -> Result<()> {
        self.prepare(Operation::Unmount, drive, &OpParams::new())?;
        self.drives.unmount(drive)?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Item operations
    // -----------------------------------------------------------------------

    /// Retrieve the item(s) at a path. Zero matches is an empty output,
    /// not an error.
    pub fn get_item(&self, path: &str, params: &OpParams) -> Result<OperationOutput> {
        self.prepare(Operation::GetItem, path, params)?;
        let Some((doc, expr)) = self.query(path) else {
            return Ok(OperationOutput::empty());
        };
        let mut out = OperationOutput::empty();
        for id in doc.select_nodes(&expr, params.namespace.as_deref())? {
            out.items.push(record(doc, id, path)?);
        }
        Ok(out)
    }

    /// `true` when at least one item exists at the path. Malformed paths
    /// and unknown drives answer `false`.
    pub fn item_exists(&self, path: &str, params: &OpParams) -> Result<bool> {
        self.prepare(Operation::ItemExists, path, params)?;
        let Some((doc, expr)) = self.query(path) else {
            return Ok(false);
        };
        Ok(doc
            .select_single(&expr, params.namespace.as_deref())?
            .is_some())
    }

    /// Replace the item(s) at a path with the supplied value.
    ///
    /// The value's children and attributes are deep-copied onto the
    /// target after its existing content is cleared. A missing value is
    /// fatal; so is addressing the document root, which has no parent to
    /// re-attach into. A value of document kind is unwrapped to the single
    /// node it wraps.
    pub fn set_item(&mut self, path: &str, params: &OpParams) -> Result<OperationOutput> {
        let desc = self.prepare(Operation::SetItem, path, params)?;
        let value = params.value.as_ref().ok_or(NavError::MissingValue)?;
        let value = unwrap_value(value)?;

        let (doc, _, expr) = mutable_document(&mut self.drives, path)?;
        let matches = doc.select_nodes(&expr, params.namespace.as_deref())?;
        if matches.is_empty() {
            return Err(NavError::ItemNotFound { path: path.into() });
        }

        let mut out = OperationOutput::empty();
        for id in matches {
            if doc.parent_of(id)?.is_none() {
                return Err(NavError::ProtectedRoot);
            }
            let name = doc.node(id)?.name.clone();
            if !self.confirm.should_process(desc.name, &name) {
                continue;
            }
            if let Err(err) = graft_value(doc, id, value) {
                warn!(path, node = %name, error = %err, "set-item failed for node");
                out.errors.push(ErrorRecord::from_error(&err, &name));
                continue;
            }
            out.items.push(record(doc, id, path)?);
        }
        Ok(out)
    }

    /// Clear the item(s) at a path: children, attributes, and payload.
    pub fn clear_item(&mut self, path: &str, params: &OpParams) -> Result<OperationOutput> {
        let desc = self.prepare(Operation::ClearItem, path, params)?;
        let (doc, _, expr) = mutable_document(&mut self.drives, path)?;
        let matches = doc.select_nodes(&expr, params.namespace.as_deref())?;
        if matches.is_empty() {
            return Err(NavError::ItemNotFound { path: path.into() });
        }

        let mut out = OperationOutput::empty();
        for id in matches {
            let name = doc.node(id)?.name.clone();
            if !self.confirm.should_process(desc.name, &name) {
                continue;
            }
            for child in doc.children_of(id)? {
                doc.remove_child(id, child)?;
            }
            {
                let node = doc.node_mut(id)?;
                node.attributes.clear();
                node.text.clear();
            }
            out.items.push(record(doc, id, path)?);
        }
        Ok(out)
    }

    // -----------------------------------------------------------------------
    // Container operations
    // -----------------------------------------------------------------------

    /// Enumerate the children of the item(s) at a path, recursing into
    /// child containers when requested.
    pub fn get_child_items(&self, path: &str, params: &OpParams) -> Result<OperationOutput> {
        self.prepare(Operation::GetChildItems, path, params)?;
        let Some((doc, expr)) = self.query(path) else {
            return Ok(OperationOutput::empty());
        };
        let mut out = OperationOutput::empty();
        for id in doc.select_nodes(&expr, params.namespace.as_deref())? {
            emit_children(doc, id, path, params.recurse, &mut out)?;
        }
        Ok(out)
    }

    /// Enumerate the immediate child names of the item(s) at a path.
    pub fn get_child_names(&self, path: &str, params: &OpParams) -> Result<OperationOutput> {
        self.prepare(Operation::GetChildNames, path, params)?;
        let Some((doc, expr)) = self.query(path) else {
            return Ok(OperationOutput::empty());
        };
        let mut out = OperationOutput::empty();
        for id in doc.select_nodes(&expr, params.namespace.as_deref())? {
            emit_children(doc, id, path, false, &mut out)?;
        }
        Ok(out)
    }

    /// `true` when the item at the path has at least one child.
    pub fn has_child_items(&self, path: &str, params: &OpParams) -> Result<bool> {
        self.prepare(Operation::HasChildItems, path, params)?;
        let Some((doc, expr)) = self.query(path) else {
            return Ok(false);
        };
        match doc.select_single(&expr, params.namespace.as_deref())? {
            Some(id) => Ok(doc.node(id)?.has_children()),
            None => Ok(false),
        }
    }

    /// Create a new item at a path.
    ///
    /// The parent container is resolved from the leaf-stripped path. An
    /// existing item at the target is an error unless `force` is set, in
    /// which case it is removed first; `force` also creates missing
    /// intermediate containers.
    pub fn new_item(&mut self, path: &str, params: &OpParams) -> Result<OperationOutput> {
        let desc = self.prepare(Operation::NewItem, path, params)?;
        let kind_name = params
            .item_kind
            .as_deref()
            .ok_or(NavError::MissingParameter { name: "itemType" })?;
        let kind = NodeKind::from_item_type(kind_name).ok_or_else(|| NavError::InvalidItemKind {
            kind: kind_name.into(),
        })?;

        let (doc, _, expr) = mutable_document(&mut self.drives, path)?;
        let leaf = leaf_name(&expr)
            .ok_or_else(|| NavError::InvalidPath { path: path.into() })?
            .to_string();
        let parent_expr = parent_path(&expr);

        let parent = match doc.select_single(&expr, params.namespace.as_deref())? {
            Some(existing) => {
                if !params.force {
                    return Err(NavError::AlreadyExists { path: path.into() });
                }
                let parent = doc.parent_of(existing)?.ok_or(NavError::ProtectedRoot)?;
                doc.remove_child(parent, existing)?;
                parent
            }
            None => match doc.select_single(&parent_expr, None)? {
                Some(parent) => parent,
                None if params.force => ensure_parents(doc, &parent_expr)?,
                None => return Err(NavError::ParentNotFound { path: path.into() }),
            },
        };

        if !self.confirm.should_process(desc.name, path) {
            return Ok(OperationOutput::empty());
        }

        // The new node takes its namespace from the parent.
        let parent_ns = doc.node(parent)?.namespace.clone();
        let id = doc.create_node(kind, &leaf, parent_ns.as_deref())?;
        doc.append_child(parent, id)?;

        let mut out = OperationOutput::empty();
        out.items.push(record(doc, id, path)?);
        Ok(out)
    }

    /// Remove the item(s) at a path.
    ///
    /// Removal is implicitly recursive: detaching a container frees its
    /// whole subtree, so no separate traversal is needed.
    pub fn remove_item(&mut self, path: &str, params: &OpParams) -> Result<OperationOutput> {
        let desc = self.prepare(Operation::RemoveItem, path, params)?;
        let (doc, _, expr) = mutable_document(&mut self.drives, path)?;
        let matches = doc.select_nodes(&expr, params.namespace.as_deref())?;
        if matches.is_empty() {
            return Err(NavError::ItemNotFound { path: path.into() });
        }

        let mut out = OperationOutput::empty();
        for id in matches {
            let name = doc.node(id)?.name.clone();
            if !self.confirm.should_process(desc.name, &name) {
                continue;
            }
            let snapshot = record(doc, id, path)?;
            match doc.parent_of(id)? {
                None => out
                    .errors
                    .push(ErrorRecord::from_error(&NavError::ProtectedRoot, path)),
                Some(parent) => match doc.remove_child(parent, id) {
                    Ok(()) => out.items.push(snapshot),
                    Err(err) => {
                        let err = NavError::from(err);
                        warn!(path, node = %name, error = %err, "remove-item failed for node");
                        out.errors.push(ErrorRecord::from_error(&err, &name));
                    }
                },
            }
        }
        Ok(out)
    }

    /// Rename the item(s) at a path.
    ///
    /// A replacement node is created with the new name and the namespace
    /// of the original's parent, the original's payload, attributes, and
    /// children are carried onto it, and it is swapped in place.
    pub fn rename_item(&mut self, path: &str, params: &OpParams) -> Result<OperationOutput> {
        let desc = self.prepare(Operation::RenameItem, path, params)?;
        let new_name = params
            .new_name
            .as_deref()
            .ok_or(NavError::MissingParameter { name: "newName" })?
            .to_string();

        let (doc, drive, expr) = mutable_document(&mut self.drives, path)?;
        let matches = doc.select_nodes(&expr, params.namespace.as_deref())?;
        if matches.is_empty() {
            return Err(NavError::ItemNotFound { path: path.into() });
        }
        let renamed_path = prefixed(Some(drive.as_str()), &join(&parent_path(&expr), &new_name));

        let mut out = OperationOutput::empty();
        for id in matches {
            let original = doc.node(id)?.clone();
            if !self.confirm.should_process(desc.name, path) {
                continue;
            }
            let Some(parent) = original.parent else {
                out.errors
                    .push(ErrorRecord::from_error(&NavError::ProtectedRoot, path));
                continue;
            };

            let parent_ns = doc.node(parent)?.namespace.clone();
            let fresh = doc.create_node(original.kind, &new_name, parent_ns.as_deref())?;
            {
                let node = doc.node_mut(fresh)?;
                node.text = original.text.clone();
                node.attributes = original.attributes.clone();
            }
            for &child in &original.children {
                let carried = doc.clone_node(child, true)?;
                doc.append_child(fresh, carried)?;
            }
            doc.replace_child(parent, id, fresh)?;
            out.items.push(record(doc, fresh, &renamed_path)?);
        }
        Ok(out)
    }

    /// Copy the item(s) at a path under a destination container.
    ///
    /// Each confirmed source node is cloned — deep when `recurse` is set —
    /// and appended to the destination. Sources are left untouched.
    pub fn copy_item(&mut self, path: &str, params: &OpParams) -> Result<OperationOutput> {
        let desc = self.prepare(Operation::CopyItem, path, params)?;
        let (doc, src_expr, dest_arg, dest) = resolve_destination(&mut self.drives, path, params)?;

        let matches = doc.select_nodes(&src_expr, params.namespace.as_deref())?;
        if matches.is_empty() {
            return Err(NavError::ItemNotFound { path: path.into() });
        }

        let mut out = OperationOutput::empty();
        for id in matches {
            let name = doc.node(id)?.name.clone();
            if !self.confirm.should_process(desc.name, &name) {
                continue;
            }
            let copy = doc.clone_node(id, params.recurse)?;
            match doc.append_child(dest, copy) {
                Ok(()) => out.items.push(record(doc, copy, &child_path(&dest_arg, &name))?),
                Err(err) => {
                    let err = NavError::from(err);
                    warn!(path, node = %name, error = %err, "copy-item failed for node");
                    out.errors.push(ErrorRecord::from_error(&err, &name));
                }
            }
        }
        Ok(out)
    }

    // -----------------------------------------------------------------------
    // Navigation operations
    // -----------------------------------------------------------------------

    /// Move the item(s) at a path under a destination container.
    ///
    /// Same shape as copy, then the original is detached from its prior
    /// parent — but never before the clone was attached, so a failed
    /// attach leaves the source in place.
    pub fn move_item(&mut self, path: &str, params: &OpParams) -> Result<OperationOutput> {
        let desc = self.prepare(Operation::MoveItem, path, params)?;
        let (doc, src_expr, dest_arg, dest) = resolve_destination(&mut self.drives, path, params)?;

        let matches = doc.select_nodes(&src_expr, params.namespace.as_deref())?;
        if matches.is_empty() {
            return Err(NavError::ItemNotFound { path: path.into() });
        }

        let mut out = OperationOutput::empty();
        for id in matches {
            let name = doc.node(id)?.name.clone();
            if !self.confirm.should_process(desc.name, &name) {
                continue;
            }
            if dest == id || is_within(doc, id, dest)? {
                let err = NavError::Unsupported {
                    operation: "moving a node into its own subtree".into(),
                };
                out.errors.push(ErrorRecord::from_error(&err, &name));
                continue;
            }
            let Some(old_parent) = doc.parent_of(id)? else {
                out.errors
                    .push(ErrorRecord::from_error(&NavError::ProtectedRoot, path));
                continue;
            };

            let copy = doc.clone_node(id, true)?;
            if let Err(err) = doc.append_child(dest, copy) {
                // Attach failed: the source stays attached to its parent.
                let err = NavError::from(err);
                warn!(path, node = %name, error = %err, "move-item failed for node");
                out.errors.push(ErrorRecord::from_error(&err, &name));
                continue;
            }
            doc.remove_child(old_parent, id)?;
            out.items.push(record(doc, copy, &child_path(&dest_arg, &name))?);
        }
        Ok(out)
    }

    /// `true` when the item at the path is a container.
    pub fn is_container(&self, path: &str, params: &OpParams) -> Result<bool> {
        self.prepare(Operation::IsContainer, path, params)?;
        let Some((doc, expr)) = self.query(path) else {
            return Ok(false);
        };
        match doc.select_single(&expr, params.namespace.as_deref())? {
            Some(id) => Ok(doc.is_container(id)?),
            None => Ok(false),
        }
    }

    /// Combine a parent path and a child name into one path, preserving
    /// any drive prefix on the parent.
    pub fn make_path(&self, parent: &str, child: &str) -> Result<String> {
        self.prepare(Operation::MakePath, parent, &OpParams::new())?;
        let (drive, rest) = split_drive(parent);
        let joined = join(rest, split_drive(child).1);
        Ok(match drive {
            Some(d) => format!("{d}:{joined}"),
            None => joined,
        })
    }

    /// The parent path of a path, preserving any drive prefix.
    pub fn parent_path(&self, path: &str) -> Result<String> {
        self.prepare(Operation::ParentPath, path, &OpParams::new())?;
        let (drive, rest) = split_drive(path);
        let parent = parent_path(&normalize(rest));
        Ok(prefixed(drive, &parent))
    }

    /// The trailing segment of a path, or `None` for a root path.
    pub fn child_name(&self, path: &str) -> Result<Option<String>> {
        self.prepare(Operation::ChildName, path, &OpParams::new())?;
        Ok(leaf_name(path).map(str::to_string))
    }

    // -----------------------------------------------------------------------
    // Property operations
    // -----------------------------------------------------------------------

    /// Retrieve attributes of the item(s) at a path.
    ///
    /// An empty `names` list retrieves every attribute. Emitted records
    /// carry a property bag: the node with only the selected attributes
    /// and no children.
    pub fn get_item_property(
        &self,
        path: &str,
        names: &[&str],
        params: &OpParams,
    ) -> Result<OperationOutput> {
        self.prepare(Operation::GetItemProperty, path, params)?;
        let Some((doc, expr)) = self.query(path) else {
            return Ok(OperationOutput::empty());
        };
        let mut out = OperationOutput::empty();
        for id in doc.select_nodes(&expr, params.namespace.as_deref())? {
            let node = doc.node(id)?;
            let mut bag = NodeValue {
                kind: node.kind,
                name: node.name.clone(),
                namespace: node.namespace.clone(),
                text: String::new(),
                attributes: node.attributes.clone(),
                children: Vec::new(),
            };
            if !names.is_empty() {
                bag.attributes.retain(|k, _| names.contains(&k.as_str()));
            }
            out.items.push(ItemRecord {
                path: path.to_string(),
                is_container: node.is_container(),
                value: bag,
            });
        }
        Ok(out)
    }

    /// Set attributes on the item(s) at a path.
    pub fn set_item_property(
        &mut self,
        path: &str,
        values: &[(&str, &str)],
        params: &OpParams,
    ) -> Result<OperationOutput> {
        let desc = self.prepare(Operation::SetItemProperty, path, params)?;
        let (doc, _, expr) = mutable_document(&mut self.drives, path)?;
        let matches = doc.select_nodes(&expr, params.namespace.as_deref())?;
        if matches.is_empty() {
            return Err(NavError::ItemNotFound { path: path.into() });
        }

        let mut out = OperationOutput::empty();
        for id in matches {
            let name = doc.node(id)?.name.clone();
            if !self.confirm.should_process(desc.name, &name) {
                continue;
            }
            let node = doc.node_mut(id)?;
            for (key, value) in values {
                node.attributes.insert((*key).to_string(), (*value).to_string());
            }
            out.items.push(record(doc, id, path)?);
        }
        Ok(out)
    }

    /// Remove attributes from the item(s) at a path.
    ///
    /// A name that is not present on a node is reported as a per-node
    /// error; the remaining names are still cleared.
    pub fn clear_item_property(
        &mut self,
        path: &str,
        names: &[&str],
        params: &OpParams,
    ) -> Result<OperationOutput> {
        let desc = self.prepare(Operation::ClearItemProperty, path, params)?;
        let (doc, _, expr) = mutable_document(&mut self.drives, path)?;
        let matches = doc.select_nodes(&expr, params.namespace.as_deref())?;
        if matches.is_empty() {
            return Err(NavError::ItemNotFound { path: path.into() });
        }

        let mut out = OperationOutput::empty();
        for id in matches {
            let name = doc.node(id)?.name.clone();
            if !self.confirm.should_process(desc.name, &name) {
                continue;
            }
            for property in names {
                if doc.node_mut(id)?.attributes.remove(*property).is_none() {
                    let err = NavError::Unsupported {
                        operation: format!("clearing unknown property {property:?}"),
                    };
                    out.errors.push(ErrorRecord::from_error(&err, &name));
                }
            }
            out.items.push(record(doc, id, path)?);
        }
        Ok(out)
    }

    // -----------------------------------------------------------------------
    // Pipeline plumbing
    // -----------------------------------------------------------------------

    /// Stage shared by every operation: capability check, descriptor
    /// parameter check, and the verbose operation trace.
    fn prepare(
        &self,
        operation: Operation,
        path: &str,
        params: &OpParams,
    ) -> Result<&'static OpDescriptor> {
        let desc = descriptor(operation);
        if !self.capabilities.supports(desc.capability) {
            return Err(NavError::CapabilityMissing(desc.capability));
        }
        check_params(desc, params)?;
        debug!(
            op = desc.name,
            path,
            namespace = ?params.namespace,
            recurse = params.recurse,
            force = params.force,
            "provider operation"
        );
        Ok(desc)
    }

    /// Resolve a query path to its drive's document and drive-less
    /// expression. `None` for malformed paths and unknown drives — query
    /// operations answer empty/false in those cases.
    fn query(&self, path: &str) -> Option<(&TreeDocument, String)> {
        if !is_well_formed(path) {
            return None;
        }
        let (drive, rest) = split_drive(path);
        let context = self.drives.get(drive?)?;
        Some((context.document(), normalize(rest)))
    }
}

impl Default for NavigationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for NavigationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationEngine")
            .field("drives", &self.drives.names())
            .field("capabilities", &self.capabilities)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Resolution helpers
// ---------------------------------------------------------------------------

/// Resolve a mutation path to its drive's document, drive name, and
/// drive-less expression. Malformed paths and unresolvable drives are
/// fatal here, unlike in queries.
fn mutable_document<'a>(
    drives: &'a mut DriveSet,
    path: &str,
) -> Result<(&'a mut TreeDocument, String, String)> {
    if !is_well_formed(path) {
        return Err(NavError::InvalidPath { path: path.into() });
    }
    let (drive, rest) = split_drive(path);
    let drive = drive.ok_or_else(|| NavError::DriveNotFound { path: path.into() })?;
    let context = drives
        .get_mut(drive)
        .ok_or_else(|| NavError::DriveNotFound { path: path.into() })?;
    let expr = normalize(rest);
    Ok((context.document_mut(), drive.to_string(), expr))
}

/// Resolve the source document/expression plus the destination node for
/// copy and move. The destination must live on the same drive, already
/// exist, and be a container.
fn resolve_destination<'a>(
    drives: &'a mut DriveSet,
    path: &str,
    params: &OpParams,
) -> Result<(&'a mut TreeDocument, String, String, NodeId)> {
    let dest_arg = params
        .destination
        .as_deref()
        .ok_or(NavError::MissingParameter { name: "destination" })?
        .to_string();
    if !is_well_formed(&dest_arg) {
        return Err(NavError::InvalidPath {
            path: dest_arg.clone(),
        });
    }

    let (doc, drive, src_expr) = mutable_document(drives, path)?;

    let (dest_drive, dest_rest) = split_drive(&dest_arg);
    if let Some(other) = dest_drive {
        if other != drive {
            return Err(NavError::Unsupported {
                operation: format!("copying or moving across drives ({drive} -> {other})"),
            });
        }
    }
    let dest_expr = normalize(dest_rest);
    let dest = doc
        .select_single(&dest_expr, None)?
        .ok_or_else(|| NavError::ItemNotFound {
            path: dest_arg.clone(),
        })?;
    if !doc.is_container(dest)? {
        return Err(NavError::NotAContainer { path: dest_arg });
    }
    Ok((doc, src_expr, dest_arg, dest))
}

/// `true` when `node` lies strictly inside the subtree rooted at
/// `ancestor`.
fn is_within(doc: &TreeDocument, ancestor: NodeId, node: NodeId) -> Result<bool> {
    let mut current = doc.parent_of(node)?;
    while let Some(id) = current {
        if id == ancestor {
            return Ok(true);
        }
        current = doc.parent_of(id)?;
    }
    Ok(false)
}

/// Walk a drive-less expression creating missing element containers,
/// returning the final container's id.
fn ensure_parents(doc: &mut TreeDocument, expr: &str) -> Result<NodeId> {
    let mut current = doc.root();
    for seg in segments(expr) {
        let found = doc
            .children_of(current)?
            .into_iter()
            .find(|&c| doc.node(c).map(|n| n.name == seg).unwrap_or(false));
        current = match found {
            Some(id) => id,
            None => {
                let created = doc.create_node(NodeKind::Element, seg, None)?;
                doc.append_child(current, created)?;
                created
            }
        };
    }
    Ok(current)
}

/// Unwrap a document-kind value to the single node it wraps.
fn unwrap_value(value: &NodeValue) -> Result<&NodeValue> {
    if value.kind != NodeKind::Document {
        return Ok(value);
    }
    match value.children.as_slice() {
        [only] => Ok(only),
        _ => Err(NavError::WrongValueType {
            reason: "a document value must wrap exactly one node".into(),
        }),
    }
}

/// Clear a target node and deep-copy the value's payload, attributes, and
/// children onto it. The target's own name and kind are untouched.
fn graft_value(doc: &mut TreeDocument, id: NodeId, value: &NodeValue) -> Result<()> {
    for child in doc.children_of(id)? {
        doc.remove_child(id, child)?;
    }
    {
        let node = doc.node_mut(id)?;
        node.text = value.text.clone();
        node.attributes = value.attributes.clone();
    }
    for child in &value.children {
        let made = child.materialize(doc)?;
        doc.append_child(id, made)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Emit helpers
// ---------------------------------------------------------------------------

/// Snapshot a node into an output record tagged with its path.
fn record(doc: &TreeDocument, id: NodeId, at: &str) -> Result<ItemRecord> {
    Ok(ItemRecord {
        path: at.to_string(),
        value: NodeValue::snapshot(doc, id)?,
        is_container: doc.is_container(id)?,
    })
}

/// Emit the children of `parent`, recursing into child containers when
/// asked.
fn emit_children(
    doc: &TreeDocument,
    parent: NodeId,
    base: &str,
    recurse: bool,
    out: &mut OperationOutput,
) -> Result<()> {
    for child in doc.children_of(parent)? {
        let name = doc.node(child)?.name.clone();
        let at = child_path(base, &name);
        out.items.push(record(doc, child, &at)?);
        if recurse && doc.is_container(child)? {
            emit_children(doc, child, &at, true, out)?;
        }
    }
    Ok(())
}

/// Compose a display path for a child of `base`, keeping the drive prefix
/// intact.
fn child_path(base: &str, name: &str) -> String {
    let trimmed = base.trim_end_matches(['/', '\\']);
    format!("{trimmed}/{name}")
}

/// Re-attach a drive prefix to a drive-less expression.
fn prefixed(drive: Option<&str>, expr: &str) -> String {
    match drive {
        Some(d) => format!("{d}:{expr}"),
        None => expr.to_string(),
    }
}
