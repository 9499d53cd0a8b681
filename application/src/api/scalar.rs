//! GraphQL scalar helpers.

use std::{fmt, marker::PhantomData, str::FromStr};

use juniper::{
    GraphQLType, InputValue, ParseScalarResult, ParseScalarValue, ScalarToken,
    ScalarValue, Value,
};

/// Helper type to use in `#[graphql(with = ..)]` attribute of API newtypes
/// wrapping validated domain strings (names, tax codes, roles).
///
/// Outputs the wrapped `Domain` value via its [`Display`] impl and parses it
/// back via its [`FromStr`] impl, so the domain validation applies to inputs.
///
/// [`Display`]: fmt::Display
#[derive(Debug)]
pub struct Via<Domain>(PhantomData<Domain>);

impl<Domain> Via<Domain> {
    /// Outputs the `Domain` value wrapped into `T` as a string [`Value`].
    pub fn to_output<T, S>(value: &T) -> Value<S>
    where
        Domain: fmt::Display,
        T: AsRef<Domain>,
        S: ScalarValue,
    {
        Value::from(value.as_ref().to_string())
    }

    /// Parses `T` out of a string [`InputValue`] via the `Domain` value.
    ///
    /// # Errors
    ///
    /// If the [`InputValue`] is not a string, or it doesn't pass the `Domain`
    /// validation.
    pub fn from_input<T, S>(input: &InputValue<S>) -> Result<T, String>
    where
        Domain: FromStr,
        Domain::Err: fmt::Display,
        T: From<Domain> + GraphQLType<S, TypeInfo = ()>,
        S: ScalarValue,
    {
        let name = T::name(&()).unwrap_or_default();
        let s = input.as_string_value().ok_or_else(|| {
            format!("`{name}` expects a string, found: {input}")
        })?;
        s.parse::<Domain>()
            .map(T::from)
            .map_err(|e| format!("`{name}` cannot be \"{s}\": {e}"))
    }

    /// Parses the provided [`ScalarToken`] as a [`String`].
    ///
    /// # Errors
    ///
    /// If the token is not a string.
    pub fn parse_token<S: ScalarValue>(
        value: ScalarToken<'_>,
    ) -> ParseScalarResult<S> {
        <String as ParseScalarValue<S>>::from_str(value)
    }
}
