//! Procedural macros for the `aoc-framework` crate.

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::{ToTokens, quote};
use syn::meta::ParseNestedMeta;
use syn::parse::Parse;
use syn::{Error, Expr, Item, ItemImpl, ItemStruct, Type, parse_macro_input};

/// Properties given to `#[solution_runner(...)]`.
#[derive(Default)]
struct RunnerProperties {
    /// The expression to use as a solution name; should resolve to string slice.
    name: Option<Expr>,
    /// The type implementing `ParseData`.
    parsed: Option<Type>,
    /// The type implementing `Solution<PartOne>`.
    part_one: Option<Type>,
    /// The type implementing `Solution<PartTwo>`.
    part_two: Option<Type>,
}

/// Parse a property's value into an empty slot, erroring if the property was already given.
fn set_once<T: Parse>(
    slot: &mut Option<T>,
    meta: &ParseNestedMeta<'_>,
    property: &str,
) -> syn::Result<()> {
    if slot.is_some() {
        return Err(meta.error(format!("duplicate '{property}' property")));
    }
    *slot = Some(meta.value()?.parse()?);
    Ok(())
}

impl RunnerProperties {
    fn parse_property(&mut self, meta: &ParseNestedMeta<'_>) -> syn::Result<()> {
        if meta.path.is_ident("name") {
            set_once(&mut self.name, meta, "name")
        } else if meta.path.is_ident("parsed") {
            set_once(&mut self.parsed, meta, "parsed")
        } else if meta.path.is_ident("part_one") {
            set_once(&mut self.part_one, meta, "part_one")
        } else if meta.path.is_ident("part_two") {
            set_once(&mut self.part_two, meta, "part_two")
        } else {
            Err(meta.error("unsupported solution runner property"))
        }
    }

    /// Build the call to the `aoc_framework::runner` function matching the given properties.
    fn solve_call(self) -> syn::Result<proc_macro2::TokenStream> {
        let missing = |property: &str| {
            Error::new(
                Span::call_site(),
                format!("missing required property: '{property}'"),
            )
        };
        let name = self.name.ok_or_else(|| missing("name"))?;
        let part_one = self.part_one.ok_or_else(|| missing("part_one"))?;

        let (function, generics) = match (self.parsed, self.part_two) {
            (None, None) => (quote!(solve_half_solution), quote!(#part_one)),
            (None, Some(part_two)) => (quote!(solve_full_solution), quote!(#part_one, #part_two)),
            (Some(parsed), None) => (
                quote!(solve_parsed_half_solution),
                quote!(#parsed, #part_one),
            ),
            (Some(parsed), Some(part_two)) => (
                quote!(solve_parsed_full_solution),
                quote!(#parsed, #part_one, #part_two),
            ),
        };

        Ok(quote! {
            aoc_framework::runner::#function::<#generics>(#name, input, handler, timed)
        })
    }
}

/// Procedural macro attribute that generates a `SolutionRunner` implementation.
///
/// The implementation routes to the `aoc_framework::runner` function matching which solution
/// types are provided.
///
/// # Properties
///
/// - `name` (required): An expression that evaluates to `&str`, representing the solution's
///   display name.
///   Can be a string literal or a constant.
///
/// - `part_one` (required): The type implementing `Solution<PartOne>` for solving part one.
///
/// - `part_two` (optional): The type implementing `Solution<PartTwo>` for solving part two.
///   If omitted, only part one will be solved.
///
/// - `parsed` (optional): A type that implements `ParseData`, used to parse input before solving.
///   If omitted, the unparsed input string is passed directly to solvers.
///
/// # Errors
///
/// Returns a compile error if:
/// - Applied to anything other than a struct or impl block
/// - Required properties (`name`, `part_one`) are missing
/// - Any property is specified more than once
/// - An unsupported property is provided
///
/// # Examples
///
/// ## With `part_one`
///
/// ```ignore
/// #[solution_runner(name = "Day 1", part_one = Day01)]
/// struct Day01Runner;
/// ```
///
/// ## With `parsed` and `part_two`, on an impl block
///
/// ```ignore
/// #[solution_runner(
///     name = "Day 6: Guard Gallivant",
///     parsed = Lab,
///     part_one = Day06,
///     part_two = Day06
/// )]
/// impl super::AdventOfCode2024<6> {}
/// ```
#[proc_macro_attribute]
pub fn solution_runner(args: TokenStream, input: TokenStream) -> TokenStream {
    let mut properties = RunnerProperties::default();
    let properties_parser = syn::meta::parser(|meta| properties.parse_property(&meta));
    parse_macro_input!(args with properties_parser);

    let item = parse_macro_input!(input as Item);
    let self_ty = match &item {
        Item::Struct(ItemStruct { ident, .. }) => ident.to_token_stream(),
        Item::Impl(ItemImpl { self_ty, .. }) => self_ty.to_token_stream(),
        _ => {
            return Error::new(
                Span::call_site(),
                "the #[solution_runner] macro can only be applied to a struct or an impl block",
            )
            .to_compile_error()
            .into();
        }
    };

    let solve_call = match properties.solve_call() {
        Ok(call) => call,
        Err(error) => return error.to_compile_error().into(),
    };

    TokenStream::from(quote! {
        #item

        impl aoc_framework::runner::SolutionRunner for #self_ty {
            fn run(
                input: &str,
                handler: &mut dyn aoc_framework::runner::OutputHandler,
                timed: bool
            ) -> aoc_framework::DynamicResult<()> {
                #solve_call
            }
        }
    })
}
