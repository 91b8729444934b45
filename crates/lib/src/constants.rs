//! Constants used throughout the library.
//!
//! This module provides central definitions for the XML layout of stored documents,
//! the namespaces of the MarkLogic payloads, and the reserved document keys.

/// Root element of every stored document.
pub const DOCUMENT_ROOT: &str = "document";

/// XPath of the root element, the context of top-level patch operations.
pub const DOCUMENT_ROOT_PATH: &str = "/document";

/// XML Schema instance namespace, carrier of the type and nil markers.
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// XML Schema namespace, used by the scalar type names.
pub const XS_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// MarkLogic REST API namespace for patch documents.
pub const REST_API_NAMESPACE: &str = "http://marklogic.com/rest-api";

/// MarkLogic query-by-example namespace.
pub const QBE_NAMESPACE: &str = "http://marklogic.com/appservices/querybyexample";

/// Type marker attribute.
pub const XSI_TYPE: &str = "xsi:type";

/// Explicit null marker attribute.
pub const XSI_NIL: &str = "xsi:nil";

/// Type marker value of scalar arrays.
pub const ARRAY_TYPE: &str = "array";

/// Type marker value of lists of sub-states.
pub const LIST_TYPE: &str = "list";

/// Separator of namespaced keys in a state (`ecm:id`).
pub const KEY_SEPARATOR: char = ':';

/// Replacement of [`KEY_SEPARATOR`] in element names (`ecm__id`).
pub const ELEMENT_SEPARATOR: &str = "__";

/// Suffix of the element name of list and array entries.
pub const ITEM_SUFFIX: &str = "__item";

/// Document id.
pub const KEY_ID: &str = "ecm:id";

/// Ids of all the ancestors of a document.
pub const KEY_ANCESTOR_IDS: &str = "ecm:ancestorIds";

/// Principals allowed to read a document.
pub const KEY_READ_ACL: &str = "ecm:racl";

/// Holder of the document lock.
pub const KEY_LOCK_OWNER: &str = "ecm:lockOwner";

/// Acquisition time of the document lock.
pub const KEY_LOCK_CREATED: &str = "ecm:lockCreated";

/// Query-level path of a document. Resolved to ids, never stored.
pub const QUERY_PATH: &str = "ecm:path";

/// Query-level fulltext pseudo-field.
pub const QUERY_FULLTEXT: &str = "ecm:fulltext";
