//! [`Handler`] abstractions.

use std::future::Future;

/// Executable handler.
///
/// Commands, queries and backend operations are all expressed as
/// [`Handler`]s parametrized by their arguments, so a single type may handle
/// many different operations.
pub trait Handler<Args = ()> {
    /// Type of successful [`Handler`] result.
    type Ok;

    /// Type of this [`Handler`] error.
    type Err;

    /// Executes this [`Handler`] with the provided arguments.
    fn execute(
        &self,
        args: Args,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>>;
}

impl<H, Args> Handler<Args> for &H
where
    H: Handler<Args> + ?Sized,
{
    type Ok = H::Ok;
    type Err = H::Err;

    fn execute(
        &self,
        args: Args,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>> {
        (**self).execute(args)
    }
}
