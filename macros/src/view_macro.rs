//! view! macro: parse HTML-like markup and generate element builder code.

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::ext::IdentExt;
use syn::parse::{Parse, ParseStream};
use syn::{braced, Error, Expr, Ident, LitStr, Result, Token};

// ---------------------------------------------------------------------------
// AST types
// ---------------------------------------------------------------------------

/// Value on the right of `name=`, or nothing for a bare flag.
#[derive(Clone)]
pub(crate) enum AttrValue {
    Lit(LitStr),
    Expr(Box<Expr>),
    Flag,
}

/// A parsed attribute: `name="value"`, `name={expr}` or `name`.
#[derive(Clone)]
pub(crate) struct Attribute {
    pub name: String,
    pub span: Span,
    pub value: AttrValue,
}

impl std::fmt::Debug for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = match &self.value {
            AttrValue::Lit(lit) => lit.value(),
            AttrValue::Expr(_) => "{..}".to_owned(),
            AttrValue::Flag => String::new(),
        };
        f.debug_struct("Attribute")
            .field("name", &self.name)
            .field("value", &value)
            .finish()
    }
}

/// Content between an element's open and close tags.
#[derive(Clone)]
pub(crate) enum Child {
    Element(Element),
    Text(String),
    Expr(Box<Expr>),
}

impl std::fmt::Debug for Child {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Child::Element(elem) => elem.fmt(f),
            Child::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Child::Expr(_) => f.write_str("Expr"),
        }
    }
}

/// A parsed element: `<tag attrs... />` or `<tag attrs...> children </tag>`.
#[derive(Clone)]
pub(crate) struct Element {
    pub tag: String,
    pub attrs: Vec<Attribute>,
    pub children: Vec<Child>,
    pub self_closing: bool,
}

impl std::fmt::Debug for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Element")
            .field("tag", &self.tag)
            .field("attrs", &self.attrs)
            .field("children", &self.children)
            .field("self_closing", &self.self_closing)
            .finish()
    }
}

/// The top-level view! input: a sequence of root elements.
#[derive(Debug)]
struct ViewInput {
    elements: Vec<Element>,
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

impl Parse for ViewInput {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut elements = Vec::new();
        while !input.is_empty() {
            elements.push(parse_element(input)?);
        }
        Ok(ViewInput { elements })
    }
}

/// Parse a possibly hyphenated name. Keywords are accepted (`type`, `for`).
fn parse_name(input: ParseStream) -> Result<(String, Span)> {
    let first = Ident::parse_any(input)?;
    let span = first.span();
    let mut name = first.to_string();
    while input.peek(Token![-]) {
        input.parse::<Token![-]>()?;
        name.push('-');
        name.push_str(&Ident::parse_any(input)?.to_string());
    }
    Ok((name, span))
}

fn parse_attribute(input: ParseStream) -> Result<Attribute> {
    let (name, span) = parse_name(input)?;
    if !input.peek(Token![=]) {
        return Ok(Attribute {
            name,
            span,
            value: AttrValue::Flag,
        });
    }
    input.parse::<Token![=]>()?;
    let value = if input.peek(LitStr) {
        AttrValue::Lit(input.parse()?)
    } else if input.peek(syn::token::Brace) {
        let content;
        braced!(content in input);
        AttrValue::Expr(Box::new(content.parse()?))
    } else {
        return Err(input.error("expected a string literal or `{expr}` attribute value"));
    };
    Ok(Attribute { name, span, value })
}

/// Parse a single element from the token stream.
pub(crate) fn parse_element(input: ParseStream) -> Result<Element> {
    input.parse::<Token![<]>()?;
    let (tag, _) = parse_name(input)?;

    let mut attrs = Vec::new();
    loop {
        if input.peek(Token![/]) {
            input.parse::<Token![/]>()?;
            input.parse::<Token![>]>()?;
            return Ok(Element {
                tag,
                attrs,
                children: Vec::new(),
                self_closing: true,
            });
        }
        if input.peek(Token![>]) {
            input.parse::<Token![>]>()?;
            break;
        }
        attrs.push(parse_attribute(input)?);
    }

    let mut children = Vec::new();
    loop {
        if input.peek(Token![<]) && input.peek2(Token![/]) {
            input.parse::<Token![<]>()?;
            input.parse::<Token![/]>()?;
            let (closing, span) = parse_name(input)?;
            if closing != tag {
                return Err(Error::new(
                    span,
                    format!("mismatched closing tag: expected `</{tag}>`, found `</{closing}>`"),
                ));
            }
            input.parse::<Token![>]>()?;
            break;
        }

        if input.peek(Token![<]) {
            children.push(Child::Element(parse_element(input)?));
        } else if input.peek(LitStr) {
            let lit: LitStr = input.parse()?;
            children.push(Child::Text(lit.value()));
        } else if input.peek(syn::token::Brace) {
            let content;
            braced!(content in input);
            children.push(Child::Expr(Box::new(content.parse()?)));
        } else {
            return Err(input.error(format!(
                "expected a child element, a string literal, `{{expr}}` or `</{tag}>`"
            )));
        }
    }

    Ok(Element {
        tag,
        attrs,
        children,
        self_closing: false,
    })
}

// ---------------------------------------------------------------------------
// Code generation
// ---------------------------------------------------------------------------

/// Event name for an `on<event>` attribute, if this is one.
fn event_name(attr: &str) -> Option<&str> {
    attr.strip_prefix("on").filter(|event| !event.is_empty())
}

fn generate_attribute(attr: &Attribute) -> Result<TokenStream> {
    let name = attr.name.as_str();
    if let Some(event) = event_name(name) {
        return match &attr.value {
            AttrValue::Expr(handler) => Ok(quote! { .on(#event, #handler) }),
            _ => Err(Error::new(
                attr.span,
                format!("`{name}` expects a handler `{{expr}}`"),
            )),
        };
    }
    let calls = match (name, &attr.value) {
        ("class", AttrValue::Lit(lit)) => {
            let classes: Vec<String> = lit.value().split_whitespace().map(str::to_owned).collect();
            quote! { #(.class(#classes))* }
        }
        ("class", AttrValue::Expr(expr)) => quote! {
            .classes(::core::convert::AsRef::<str>::as_ref(&(#expr)).split_whitespace())
        },
        ("key", AttrValue::Expr(expr)) => quote! { .key(#expr) },
        ("key", _) => {
            return Err(Error::new(attr.span, "`key` expects an `{expr}` value"));
        }
        (_, AttrValue::Lit(lit)) => quote! { .attr(#name, #lit) },
        (_, AttrValue::Expr(expr)) => quote! { .attr(#name, #expr) },
        (_, AttrValue::Flag) => quote! { .attr(#name, "") },
    };
    Ok(calls)
}

/// Generate the builder chain for a single element.
fn generate_element(elem: &Element) -> Result<TokenStream> {
    let tag = &elem.tag;
    let mut calls = Vec::new();

    for attr in &elem.attrs {
        calls.push(generate_attribute(attr)?);
    }

    for child in &elem.children {
        match child {
            Child::Element(child) => {
                let code = generate_element(child)?;
                calls.push(quote! { .child(#code) });
            }
            Child::Text(text) => calls.push(quote! { .text(#text) }),
            Child::Expr(expr) => calls.push(quote! { .child(#expr) }),
        }
    }

    Ok(quote! {
        ::reactree::vnode::el(#tag) #(#calls)*
    })
}

/// Entry point: one root yields its `ElementBuilder`; several yield a
/// `Vec<VNode>`.
pub(crate) fn view_impl(input: TokenStream) -> Result<TokenStream> {
    let parsed: ViewInput = syn::parse2(input)?;

    match parsed.elements.as_slice() {
        [] => Err(Error::new(
            Span::call_site(),
            "view! macro requires at least one element",
        )),
        [root] => generate_element(root),
        roots => {
            let codes = roots
                .iter()
                .map(generate_element)
                .collect::<Result<Vec<_>>>()?;
            Ok(quote! {
                ::std::vec![#(::reactree::vnode::VNode::from(#codes)),*]
            })
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
