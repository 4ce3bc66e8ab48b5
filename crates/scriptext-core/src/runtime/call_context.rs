//! Call context bridging the host runtime and native Rust functions.

use std::fmt;

use crate::arg::FromArg;
use crate::error::{ConversionError, NativeError, StringBufferError};
use crate::{FunctionArg, FunctionDescriptor};

use super::heap::{string_len, string_to_buffer};
use super::{
    Borrowed, BorrowedObject, BorrowedString, HostHeap, ManagedHandle, OwnedObject, OwnedString,
    acquire,
};

/// Context for one native function call.
///
/// Gives the implementation its own descriptor, the marshalled arguments in
/// declaration order and the host heap. String and object arguments come out
/// as [`Borrowed`] handles that cannot outlive the call.
///
/// ```ignore
/// let a: u32 = ctx.arg(0)?;
/// let name = ctx.string_arg(1)?;
/// let text = ctx.read_string(&name)?;
/// ```
pub struct CallContext<'call> {
    function: &'call FunctionDescriptor,
    args: &'call [FunctionArg],
    heap: &'call dyn HostHeap,
}

impl<'call> CallContext<'call> {
    /// Create a new call context.
    ///
    /// `args` must already match the descriptor's parameters; see
    /// [`FunctionDescriptor::invoke_marshalled`].
    pub fn new(
        function: &'call FunctionDescriptor,
        args: &'call [FunctionArg],
        heap: &'call dyn HostHeap,
    ) -> Self {
        Self {
            function,
            args,
            heap,
        }
    }

    /// The descriptor of the function being called.
    pub fn function(&self) -> &'call FunctionDescriptor {
        self.function
    }

    /// Name of the function being called.
    pub fn name(&self) -> &'call str {
        self.function.name()
    }

    /// All arguments, in declaration order.
    pub fn args(&self) -> &'call [FunctionArg] {
        self.args
    }

    /// Get the number of arguments.
    pub fn arg_count(&self) -> usize {
        self.args.len()
    }

    /// Get a raw reference to an argument slot.
    pub fn arg_slot(&self, index: usize) -> Result<&'call FunctionArg, NativeError> {
        self.args
            .get(index)
            .ok_or(NativeError::ArgumentIndexOutOfBounds {
                index,
                count: self.arg_count(),
            })
    }

    /// Get a typed argument value.
    ///
    /// The argument must carry exactly the requested kind.
    pub fn arg<T: FromArg>(&self, index: usize) -> Result<T, NativeError> {
        let slot = self.arg_slot(index)?;
        T::from_arg(slot).map_err(NativeError::Conversion)
    }

    /// A string argument as a call-scoped handle.
    pub fn string_arg(&self, index: usize) -> Result<BorrowedString<'call>, NativeError> {
        self.borrowed_arg(index)
    }

    /// An object argument as a call-scoped handle.
    pub fn object_arg(&self, index: usize) -> Result<BorrowedObject<'call>, NativeError> {
        self.borrowed_arg(index)
    }

    fn borrowed_arg<H>(&self, index: usize) -> Result<Borrowed<'call, H>, NativeError>
    where
        H: ManagedHandle + FromArg,
    {
        let handle: H = self.arg(index)?;
        Borrowed::from_host(self.heap, handle).ok_or(NativeError::StaleHandle {
            kind: H::KIND,
            index: handle.index(),
        })
    }

    /// Get access to the host heap.
    pub fn heap(&self) -> &'call dyn HostHeap {
        self.heap
    }

    /// Byte length of a string.
    pub fn string_len(&self, string: &BorrowedString<'_>) -> Result<usize, StringBufferError> {
        string_len(self.heap, string)
    }

    /// Copy a string's bytes into `buffer`. See [`string_to_buffer`].
    pub fn string_to_buffer(
        &self,
        string: &BorrowedString<'_>,
        buffer: &mut [u8],
    ) -> Result<usize, StringBufferError> {
        string_to_buffer(self.heap, string, buffer)
    }

    /// Query the size, then materialize the string into an owned `String`.
    pub fn read_string(&self, string: &BorrowedString<'_>) -> Result<String, NativeError> {
        let required = match self.string_to_buffer(string, &mut []) {
            Ok(written) => written,
            Err(err) => err.required().ok_or(NativeError::StringBuffer(err))?,
        };
        let mut buffer = vec![0u8; required];
        let written = self.string_to_buffer(string, &mut buffer)?;
        buffer.truncate(written);
        String::from_utf8(buffer).map_err(|_| NativeError::Conversion(ConversionError::InvalidUtf8))
    }

    /// Keep a string argument alive past this call.
    pub fn acquire_string(&self, string: &BorrowedString<'_>) -> Result<OwnedString, NativeError> {
        acquire(self.heap, string)
    }

    /// Keep an object argument alive past this call.
    pub fn acquire_object(&self, object: &BorrowedObject<'_>) -> Result<OwnedObject, NativeError> {
        acquire(self.heap, object)
    }
}

impl fmt::Debug for CallContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallContext")
            .field("function", &self.function.name())
            .field("args", &self.args)
            .finish()
    }
}
