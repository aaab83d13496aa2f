/// Generate a typed router method: build the request parameters, route the
/// domain through [`Vnfin::get`](crate::Vnfin::get) and project the canonical
/// table into records.
///
/// The `params:` expression may use the method's arguments by name.
#[macro_export]
macro_rules! vnfin_router_method {
    (
        $(#[$meta:meta])*
        method: $name:ident( $( $arg_ident:ident : $arg_ty:ty ),* ) -> $rec:ty,
        domain: $domain:expr,
        params: $params:expr
    ) => {
        $(#[$meta])*
        #[cfg_attr(
            feature = "tracing",
            tracing::instrument(
                target = "vnfin::router",
                skip(self),
                fields(domain = %$domain),
            )
        )]
        ///
        /// # Errors
        /// Returns an error if the arguments are invalid, no provider serves the
        /// domain, or every candidate fails.
        pub async fn $name(
            &self,
            $( $arg_ident: $arg_ty ),*
        ) -> Result<Vec<$rec>, vnfin_core::VnError> {
            let params: vnfin_core::RequestParams = $params;
            self.get($domain, &params).await?.records::<$rec>()
        }
    };
}
