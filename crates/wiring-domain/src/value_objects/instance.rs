//! Type-erased instances

use std::any::{Any, type_name};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::value_objects::Token;

/// A resolved value, shared between every consumer that receives it
pub type Instance = Arc<dyn Any + Send + Sync>;

/// Recover the concrete type of an instance resolved for `token`
pub fn downcast_instance<T>(token: &Token, instance: Instance) -> Result<Arc<T>>
where
    T: Send + Sync + 'static,
{
    instance.downcast::<T>().map_err(|_| Error::TypeMismatch {
        token: token.clone(),
        expected: type_name::<T>(),
    })
}
