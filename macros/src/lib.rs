//! Proc macros for reactree: `view!` markup composition.
//!
//! This crate is not meant to be used directly. Enable the `macros` feature on
//! `reactree`.

use proc_macro::TokenStream;

mod view_macro;

/// HTML-like markup macro.
///
/// Transforms markup into `reactree::vnode::el` builder chains.
///
/// # Syntax
///
/// - `<tag />`: element without children
/// - `<tag attr="val"> ... </tag>`: element with children
/// - `"text"`: text child
/// - `{expr}`: any `Into<VNode>` child
///
/// # Attributes
///
/// - `class="a b"` becomes `.class("a").class("b")`; `class={expr}` splits at runtime
/// - `key={expr}` becomes `.key(expr)`
/// - `onclick={handler}` becomes `.on("click", handler)`
/// - `name="value"` and `name={expr}` become `.attr("name", value)`
/// - a bare `name` becomes `.attr("name", "")`
///
/// Names may be hyphenated (`aria-label`) or keywords (`type`, `for`).
///
/// A single root yields its `ElementBuilder`, ready to return from
/// `Widget::render`. Several roots yield a `Vec<VNode>`.
///
/// # Example
///
/// ```ignore
/// fn render(&self, _cx: &RenderCx<'_>) -> Rendered {
///     let count = self.count.clone();
///     Ok(view! {
///         <button type="button" class="btn counter" onclick={move |_| { count.update(|n| *n += 1); }}>
///             {self.count.get().to_string()}
///         </button>
///     })
/// }
/// ```
#[proc_macro]
pub fn view(input: TokenStream) -> TokenStream {
    view_macro::view_impl(input.into())
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}
