use proc_macro2::TokenStream;

#[inline(always)]
pub(crate) fn empty() -> TokenStream {
    TokenStream::new()
}

/// Whether `ty` mentions a reference, a lifetime or `impl Trait` anywhere.
pub(crate) fn borrows(ty: &syn::Type) -> bool {
    use syn::visit::Visit;

    struct Finder(bool);

    impl Visit<'_> for Finder {
        fn visit_type_reference(&mut self, _: &syn::TypeReference) {
            self.0 = true;
        }

        fn visit_lifetime(&mut self, _: &syn::Lifetime) {
            self.0 = true;
        }

        fn visit_type_impl_trait(&mut self, _: &syn::TypeImplTrait) {
            self.0 = true;
        }
    }

    let mut finder = Finder(false);
    finder.visit_type(ty);
    finder.0
}
