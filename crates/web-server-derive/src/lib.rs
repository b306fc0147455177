extern crate proc_macro;

use proc_macro::TokenStream;

/// Implements `actix_web::ResponseError` for an error type.
///
/// The response body is a `PhotoApiResponse` whose `error` names the failing
/// variant and nothing else; the error's message and sources stay server side.
/// The status defaults to 500 and can be overridden with
/// `#[status_code(BAD_GATEWAY)]` naming an `actix_web::http::StatusCode`
/// constant.
#[proc_macro_derive(ApiError, attributes(status_code))]
pub fn derive_response_error(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as syn::DeriveInput);

    let name = input.ident;

    let status_code = match input
        .attrs
        .iter()
        .find(|attr| attr.path.is_ident("status_code"))
        .map(|attr| attr.parse_args::<syn::Ident>())
        .transpose()
    {
        Ok(status_code) => status_code
            .unwrap_or_else(|| syn::Ident::new("INTERNAL_SERVER_ERROR", name.span())),
        Err(err) => return TokenStream::from(err.to_compile_error()),
    };

    let kind_name = match input.data {
        syn::Data::Enum(data) => {
            let arms = data.variants.iter().map(|variant| {
                let ident = &variant.ident;
                let kind = ident.to_string();
                quote::quote! { Self::#ident { .. } => #kind }
            });
            quote::quote! {
                match self {
                    #(#arms,)*
                }
            }
        }
        _ => {
            let kind = name.to_string();
            quote::quote! { #kind }
        }
    };

    TokenStream::from(quote::quote! {
        impl #name {
            pub fn kind_name(&self) -> &'static str {
                #kind_name
            }
        }

        impl ::actix_web::ResponseError for #name {
            fn status_code(&self) -> ::actix_web::http::StatusCode {
                ::actix_web::http::StatusCode::#status_code
            }

            fn error_response(&self) -> ::actix_web::HttpResponse {
                ::actix_web::HttpResponse::build(self.status_code()).json(
                    ::carousel_web_core::PhotoApiResponse::error(format!(
                        "An unexpected error occurred: {}",
                        self.kind_name()
                    )),
                )
            }
        }
    })
}
