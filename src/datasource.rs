use crate::service::ApiRequestable;

/// A data source built on top of an injected [`ApiRequestable`].
///
/// ```
/// use std::borrow::Cow;
/// use github_client::{ApiRequestable, ApiService, ClientError, Endpoint, RemoteDataSource};
/// use serde::Deserialize;
///
/// struct GetUser<'a>(&'a str);
///
/// impl Endpoint for GetUser<'_> {
///     fn path(&self) -> Cow<'_, str> {
///         Cow::Owned(format!("/users/{}", self.0))
///     }
/// }
///
/// #[derive(Deserialize)]
/// struct User {
///     login: String,
/// }
///
/// struct UserDataSource<S> {
///     api_service: S,
/// }
///
/// impl<S: ApiRequestable> RemoteDataSource for UserDataSource<S> {
///     type Service = S;
///
///     fn new(api_service: S) -> Self {
///         Self { api_service }
///     }
///
///     fn api_service(&self) -> &S {
///         &self.api_service
///     }
/// }
///
/// impl<S: ApiRequestable> UserDataSource<S> {
///     async fn user(&self, login: &str) -> Result<User, ClientError> {
///         self.api_service().send(&GetUser(login)).await
///     }
/// }
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), ClientError> {
/// let source = UserDataSource::new(ApiService::mocked(200, r#"{"login":"octocat"}"#));
/// let user = source.user("octocat").await?;
/// assert_eq!(user.login, "octocat");
/// # Ok(())
/// # }
/// ```
pub trait RemoteDataSource {
    /// Service used to send requests and decode responses.
    type Service: ApiRequestable;

    /// Creates the data source around `api_service`.
    fn new(api_service: Self::Service) -> Self;

    /// The injected service.
    fn api_service(&self) -> &Self::Service;
}
