// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Procedural macros for `strata-data`.

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput, LitStr};

/// Implements `Component` for a struct.
///
/// The generated impl also provides `Component::NAME`, the stable name used in
/// logs and in the component registry. It defaults to the type's identifier and
/// can be overridden with `#[component(name = "...")]`.
#[proc_macro_derive(Component, attributes(component))]
pub fn derive_component(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let mut display_name = LitStr::new(&name.to_string(), name.span());
    for attr in input.attrs.iter().filter(|a| a.path().is_ident("component")) {
        let parsed = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                display_name = meta.value()?.parse()?;
                Ok(())
            } else {
                Err(meta.error("unsupported component attribute"))
            }
        });
        if let Err(err) = parsed {
            return err.to_compile_error().into();
        }
    }

    // The `where` clause carries through so that the struct itself must meet
    // the supertrait bounds required by `Component`.
    let expanded = quote! {
        impl #impl_generics crate::ecs::Component for #name #ty_generics #where_clause {
            const NAME: &'static str = #display_name;
        }
    };

    TokenStream::from(expanded)
}
