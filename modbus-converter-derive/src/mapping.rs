use crate::entry::{Entry, Quantity};
use proc_macro2::Ident;
use syn::{Data, DeriveInput, Fields};

#[derive(Debug, Clone)]
pub struct Mapping(pub Vec<Entry>);

impl Mapping {
    pub fn new(ast: &DeriveInput) -> Self {
        let data_struct = match &ast.data {
            Data::Struct(data_struct) => data_struct,
            _ => panic!("Trait can be implemented only for a struct."),
        };

        let named_fields = match &data_struct.fields {
            Fields::Named(fields_named) => &fields_named.named,
            _ => panic!("Trait can be implemented only for a struct with named fields."),
        };
        let map: Vec<Entry> = named_fields
            .iter()
            .filter(|field| {
                field
                    .attrs
                    .iter()
                    .any(|attr| attr.path().is_ident("modbus"))
            })
            .cloned()
            .map(From::from)
            .collect::<Vec<_>>();

        let mapping = Self(map);
        if let Some(key) = mapping.duplicate_key() {
            panic!("Parameter key `{key}` is used by more than one field.");
        }

        mapping
    }

    pub fn field_name_vec(&self) -> Vec<Ident> {
        self.0
            .iter()
            .map(|x| x.field_name_ident())
            .collect::<Vec<_>>()
    }

    pub fn key_vec(&self) -> Vec<String> {
        self.0.iter().map(|x| x.key.clone()).collect::<Vec<_>>()
    }

    pub fn ty_vec(&self) -> Vec<Ident> {
        self.0
            .iter()
            .map(|entry| entry.ty_ident())
            .collect::<Vec<_>>()
    }

    pub fn cnt_vec(&self) -> Vec<Quantity> {
        self.0.iter().map(|x| x.cnt).collect::<Vec<_>>()
    }

    fn duplicate_key(&self) -> Option<&str> {
        self.0.iter().enumerate().find_map(|(i, entry)| {
            self.0[..i]
                .iter()
                .any(|previous| previous.key == entry.key)
                .then_some(entry.key.as_str())
        })
    }
}
