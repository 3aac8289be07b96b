//! One handler per message kind. Handlers hold all of the dispatch
//! business logic; the worker and router around them only route.

use grid_protocol::{NodeMessage, NodeReply};
use grid_store::{ObjectValue, StoredObject};
use grid_types::{Pointer, Uid};

use crate::error::{WorkerError, WorkerResult};
use crate::worker::Worker;

pub(crate) fn save_object(worker: &Worker, msg: NodeMessage) -> WorkerResult<NodeReply> {
    match msg {
        NodeMessage::SaveObject { uid, object } => {
            worker.store().save(uid, object)?;
            Ok(NodeReply::Ack)
        }
        other => Err(mismatched(&other)),
    }
}

pub(crate) fn get_object(worker: &Worker, msg: NodeMessage) -> WorkerResult<NodeReply> {
    match msg {
        NodeMessage::GetObject { uid } => match worker.store().get(&uid)? {
            Some(object) => Ok(NodeReply::Object(object)),
            None => Ok(NodeReply::NotFound(uid)),
        },
        other => Err(mismatched(&other)),
    }
}

pub(crate) fn delete_object(worker: &Worker, msg: NodeMessage) -> WorkerResult<NodeReply> {
    match msg {
        NodeMessage::DeleteObject { uid } => {
            if worker.store().delete(&uid)? {
                Ok(NodeReply::Ack)
            } else {
                Ok(NodeReply::NotFound(uid))
            }
        }
        other => Err(mismatched(&other)),
    }
}

pub(crate) fn run_class_method(worker: &Worker, msg: NodeMessage) -> WorkerResult<NodeReply> {
    let (uid, method_name, args) = match msg {
        NodeMessage::RunClassMethod {
            uid,
            method_name,
            args,
        } => (uid, method_name, args),
        other => return Err(mismatched(&other)),
    };

    let (receiver, receiver_uid) = match resolve_local(worker, uid)? {
        Resolved::Missing(missing) => return Ok(NodeReply::NotFound(missing)),
        Resolved::Entry { object, uid } => (object, uid),
    };
    let (receiver_value, type_path) = match receiver {
        StoredObject::Value { value, type_path } => (value, type_path),
        StoredObject::Remote(pointer) => {
            return Err(WorkerError::UnsupportedIndirection {
                uid: receiver_uid,
                location: pointer.location,
            })
        }
    };
    let type_path = type_path.ok_or(WorkerError::UntypedReceiver(receiver_uid))?;

    let method_path = format!("{type_path}.{method_name}");
    let callable =
        worker
            .frameworks()
            .resolve_callable(&method_path)
            .map_err(|_| WorkerError::UnknownMethod {
                type_path: type_path.clone(),
                method: method_name.clone(),
            })?;

    // The receiver rides in front of the caller-supplied arguments.
    let mut call_args = Vec::with_capacity(args.len() + 1);
    call_args.push(receiver_value);
    call_args.extend(args);
    let result = callable(&call_args)?;

    store_result(worker, result, None)
}

pub(crate) fn run_function_or_constructor(
    worker: &Worker,
    msg: NodeMessage,
) -> WorkerResult<NodeReply> {
    let (path, args) = match msg {
        NodeMessage::RunFunctionOrConstructor { path, args } => (path, args),
        other => return Err(mismatched(&other)),
    };

    let node = worker.frameworks().resolve(&path)?;
    let callable = node
        .callable()
        .ok_or_else(|| WorkerError::UnknownPath(path.clone()))?;
    let result = callable(&args)?;

    // A node with children is a class, so the call was a constructor and
    // the result's type is the path itself; method dispatch needs it.
    let type_path = node.has_children().then(|| path.clone());
    store_result(worker, result, type_path)
}

/// What a uid resolved to after at most one local pointer hop.
enum Resolved {
    /// The chain ended at an absent entry.
    Missing(Uid),
    /// A locally owned entry.
    Entry { object: StoredObject, uid: Uid },
}

/// Look up `uid`, following at most one `Remote` hop and only when the
/// pointer targets this worker's own store. Anything further (a pointer
/// owned by another node, or a second `Remote` entry) is unsupported
/// indirection and fails rather than being chased.
fn resolve_local(worker: &Worker, uid: Uid) -> WorkerResult<Resolved> {
    let entry = match worker.store().get(&uid)? {
        Some(entry) => entry,
        None => return Ok(Resolved::Missing(uid)),
    };
    let pointer = match entry {
        StoredObject::Remote(pointer) => pointer,
        object => return Ok(Resolved::Entry { object, uid }),
    };
    if !pointer.points_at(worker.id()) {
        return Err(WorkerError::UnsupportedIndirection {
            uid,
            location: pointer.location,
        });
    }
    match worker.store().get(&pointer.uid)? {
        None => Ok(Resolved::Missing(pointer.uid)),
        Some(StoredObject::Remote(next)) => Err(WorkerError::UnsupportedIndirection {
            uid: pointer.uid,
            location: next.location,
        }),
        Some(object) => Ok(Resolved::Entry {
            object,
            uid: pointer.uid,
        }),
    }
}

/// Park an invocation result in the store under a fresh uid and reply with
/// a pointer to it; callers fetch inline values with a follow-up get.
fn store_result(
    worker: &Worker,
    result: ObjectValue,
    type_path: Option<String>,
) -> WorkerResult<NodeReply> {
    let result_uid = Uid::generate();
    let mut pointer = Pointer::new(result_uid, worker.id().clone());
    let object = match type_path {
        Some(path) => {
            pointer = pointer.with_type(path.clone());
            StoredObject::typed(result, path)
        }
        None => StoredObject::value(result),
    };
    worker.store().save(result_uid, object)?;
    Ok(NodeReply::Pointer(pointer))
}

fn mismatched(msg: &NodeMessage) -> WorkerError {
    WorkerError::Internal(format!(
        "handler bound to the wrong kind received {}",
        msg.type_name()
    ))
}
