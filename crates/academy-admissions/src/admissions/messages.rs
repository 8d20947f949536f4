//! User-facing strings. Clients match on these verbatim, so keep them stable.

pub const SUBMITTED: &str = "지원서가 성공적으로 제출되었습니다";
pub const STATUS_UPDATED: &str = "지원서 상태가 성공적으로 업데이트되었습니다";
pub const DELETED: &str = "지원서가 성공적으로 삭제되었습니다";

pub const INVALID_INPUT: &str = "입력 데이터가 올바르지 않습니다";
pub const DUPLICATE_PHONE: &str = "이미 해당 기수에 지원하신 전화번호입니다";
pub const NOT_FOUND: &str = "지원서를 찾을 수 없습니다";

pub const LOAD_FAILED: &str = "지원서를 불러오는데 실패했습니다";
pub const SUBMIT_FAILED: &str = "지원서 제출에 실패했습니다";
pub const UPDATE_FAILED: &str = "지원서 업데이트에 실패했습니다";
pub const DELETE_FAILED: &str = "지원서 삭제에 실패했습니다";
pub const STATS_FAILED: &str = "통계를 불러오는데 실패했습니다";

pub const NAME_REQUIRED: &str = "성명을 입력해주세요";
pub const NAME_TOO_LONG: &str = "이름은 50자 이하로 입력해주세요";
pub const PHONE_FORMAT: &str = "010-1234-5678 형식으로 입력해주세요";
pub const GENDER_INVALID: &str = "성별은 '남' 또는 '여' 중에서 선택해주세요";
pub const COMPANY_POSITION_REQUIRED: &str = "소속과 직위를 입력해주세요";
pub const COMPANY_POSITION_TOO_LONG: &str = "소속과 직위는 200자 이하로 입력해주세요";
pub const ADDRESS_TOO_LONG: &str = "주소는 300자 이하로 입력해주세요";
pub const INTERESTS_REQUIRED: &str = "관심 분야를 최소 1개 이상 선택해주세요";
pub const INTERESTS_TOO_MANY: &str = "관심 분야는 최대 10개까지 선택 가능합니다";
pub const INTEREST_NOT_TEXT: &str = "관심 분야는 문자열이어야 합니다";
pub const GOLF_REQUIRED: &str = "골프 여부를 선택해주세요";
pub const REFERRER_TOO_LONG: &str = "추천인은 100자 이하로 입력해주세요";
pub const TAX_INVOICE_REQUIRED: &str = "세금계산서 발행 여부를 선택해주세요";
pub const GENERATION_REQUIRED: &str = "기수를 선택해주세요";
pub const GENERATION_OUT_OF_RANGE: &str = "유효하지 않은 기수입니다";
pub const GENERATION_NOT_INTEGER: &str = "기수는 정수로 입력해주세요";
pub const STATUS_INVALID: &str = "유효하지 않은 상태값입니다";
pub const TEXT_EXPECTED: &str = "문자열 형식으로 입력해주세요";
