pub mod contact_form;
