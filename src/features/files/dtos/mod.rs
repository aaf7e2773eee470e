mod file_dto;

pub use file_dto::{
    extension_for, purpose_folder, validate_image, DeleteFileByUrlDto, DeleteFileResponseDto,
    FileResponseDto, UploadImageDto, ALLOWED_IMAGE_TYPES, DEFAULT_PURPOSE, MAX_IMAGE_SIZE,
};
