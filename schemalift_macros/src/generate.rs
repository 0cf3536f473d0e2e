use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

use crate::attributes::VersionAttributes;

/// `impl ::schemalift::Version` for the derive input.
pub fn version_impl(input: &DeriveInput, attrs: &VersionAttributes) -> TokenStream {
    let ident = &attrs.ident;
    let id = &attrs.id;
    let encodings = attrs.encodings.iter();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    quote! {
        impl #impl_generics ::schemalift::Version for #ident #ty_generics #where_clause {
            const VERSION_ID: &'static str = #id;
            const ENCODINGS: &'static [::schemalift::codec::Encoding] = &[
                #(::schemalift::codec::Encoding::#encodings),*
            ];
        }
    }
}
