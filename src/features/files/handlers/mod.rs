pub mod file_handler;

pub use file_handler::{
    __path_delete_file_by_url, __path_upload_image, delete_file_by_url, upload_image,
};
