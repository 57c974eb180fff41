//! Macros to `derive` the `modbus-converter` traits

use proc_macro::TokenStream;
use quote::quote;

mod entry;
mod mapping;
mod utils;

/// Derive macro to implement `modbus_converter::core::InputParams`
#[proc_macro_derive(InputParams, attributes(modbus))]
pub fn derive_input_params(input: TokenStream) -> TokenStream {
    let ast = syn::parse_macro_input!(input as syn::DeriveInput);

    let name = &ast.ident;

    let mapping = mapping::Mapping::new(&ast);

    let field_name = mapping.field_name_vec();
    let key = mapping.key_vec();
    let ty = mapping.ty_vec();
    let cnt = mapping.cnt_vec();

    let tokens = quote! {
        impl modbus_converter::core::InputParams for #name {
            fn feature_map() -> modbus_converter::feature_map::DeviceFeatureMap {
                modbus_converter::feature_map::DeviceFeatureMap::default()
                #(
                    .with_param(
                        #key,
                        modbus_converter::feature_map::RegisterDescriptor::new(
                            modbus_converter::feature_map::RegisterType::#ty,
                            #cnt,
                        ),
                    )
                )*
            }

            fn values(&self) -> modbus_converter::feature_map::Values {
                let mut values = modbus_converter::feature_map::Values::new();
                #(
                    values.insert(#key.to_string(), modbus_converter::codec::digits(&self.#field_name));
                )*
                values
            }
        }
    };

    tokens.into()
}

#[proc_macro_attribute]
pub fn modbus_doc(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut ast = syn::parse_macro_input!(item as syn::DeriveInput);
    match &mut ast.data {
        syn::Data::Struct(ref mut struct_data) => {
            match &mut struct_data.fields {
                syn::Fields::Named(fields_named) => {
                    for field in &mut fields_named.named {
                        if field
                            .attrs
                            .iter()
                            .any(|attr| attr.path().is_ident("modbus"))
                        {
                            let entry: entry::Entry = field.clone().into();
                            let doc = match entry.ty.unit_size() {
                                Some(size) => format!("parameter - `{}`, register type - `{:?}` (`{}` registers, `{}` bytes).", entry.key, entry.ty, entry.cnt, size * usize::from(entry.cnt)),
                                None => format!("parameter - `{}`, register type - `{:?}` (`{}` registers, read-only).", entry.key, entry.ty, entry.cnt),
                            };
                            let doc: syn::Attribute = syn::parse_quote!(#[doc = #doc]);
                            field.attrs.push(doc);
                        }
                    }
                }
                _ => panic!("`modbus_doc` has to be applied to structs with named fields"),
            }

            quote! {
                #ast
            }
            .into()
        }
        _ => panic!("`modbus_doc` has to be applied with structs"),
    }
}
