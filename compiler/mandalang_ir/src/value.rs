//! Runtime values produced by the evaluator.

use crate::fragment::FragmentId;
use crate::node::NodeId;
use crate::types::Type;

/// A native Rust function backing a prelude built-in. Built-ins are pure: argument list in,
/// value or evaluation error out (the error type lives in `mandalang_eval`, so this signature
/// is generic over a boxed dynamic error to avoid a dependency cycle).
pub type BuiltinFn = fn(&[Value]) -> Result<Value, BuiltinError>;

/// Opaque evaluation failure surfaced from a built-in; `mandalang_eval` converts this into a
/// `MandaError` with the appropriate `ErrorKind`.
#[derive(Clone, Debug)]
pub struct BuiltinError(pub String);

/// Either a user-defined function body (an index into one fragment's IR) or a built-in.
#[derive(Copy, Clone, Debug)]
pub enum FunctionBody {
    /// Points at a `ResolvedFunctionLit` node in the fragment named by `FragmentId`; its attached
    /// scope captures the enclosing lexical environment by index (§4.5, §9 "Closures"). The
    /// fragment is carried explicitly because a closure created on one input line is commonly
    /// called from a later one, evaluated against a different fragment's arena (§3).
    Native(FragmentId, NodeId),
    Builtin(BuiltinFn),
}

#[derive(Copy, Clone, Debug)]
pub struct FunctionValue {
    pub ty: Type,
    pub body: FunctionBody,
}

/// A runtime value: one of three primitives, or a function (§3).
#[derive(Copy, Clone, Debug)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Function(FunctionValue),
}

impl Value {
    pub fn type_of(&self) -> Type {
        match self {
            Value::Integer(_) => Type::Integer,
            Value::Float(_) => Type::Float,
            Value::Boolean(_) => Type::Boolean,
            Value::Function(f) => f.ty,
        }
    }
}
