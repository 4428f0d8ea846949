use super::AppTheme;

/// Dark - default theme, cool slate blues with a cyan accent
pub fn dark() -> AppTheme {
    AppTheme::from_hex(
        "Dark",
        0x002E_3440, // bg_base - Deepest slate
        0x0024_2933, // bg_sidebar - Slightly darker
        0x003B_4252, // bg_surface - Cards
        0x0043_4C5E, // bg_elevated - Inputs, buttons
        0x004C_566A, // bg_hover - Hover states
        0x005E_81AC, // bg_active - Muted blue
        0x00EC_EFF4, // fg_primary - Near white
        0x00D8_DEE9, // fg_secondary - Soft gray
        0x0061_6E88, // fg_muted - Slate lightened
        0x002E_3440, // fg_on_accent - Dark text on light accent
        0x0088_C0D0, // accent - Cyan
        0x008F_BCBB, // accent_hover - Teal
        0x00A3_BE8C, // success - Green
        0x00EB_CB8B, // warning - Yellow
        0x00BF_616A, // danger - Red
        0x0081_A1C1, // info - Blue
        0x0043_4C5E, // border - Elevated slate
        0x005E_81AC, // border_strong - Muted blue
        0x003B_4252, // divider - Surface slate
    )
}

/// Light - soft whites with a blue accent
pub fn light() -> AppTheme {
    AppTheme::from_hex(
        "Light",
        0x00FA_FAFA, // bg_base - Soft white
        0x00F0_F0F0, // bg_sidebar - Light gray
        0x00FF_FFFF, // bg_surface - Pure white cards
        0x00EC_ECEC, // bg_elevated - Slightly darker
        0x00DB_DBDB, // bg_hover - Hover gray
        0x00CA_CACA, // bg_active - Active gray
        0x0038_3A42, // fg_primary - Dark gray
        0x006A_6C75, // fg_secondary - Medium gray
        0x009C_9EA6, // fg_muted - Light gray
        0x00FA_FAFA, // fg_on_accent - Light on accent
        0x0040_78F2, // accent - Blue
        0x0030_68E0, // accent_hover - Darker blue
        0x0050_A14F, // success - Green
        0x00C1_8401, // warning - Orange
        0x00E4_5649, // danger - Red
        0x0040_78F2, // info - Blue
        0x00DB_DBDB, // border - Light border
        0x0040_78F2, // border_strong - Blue border
        0x00EC_ECEC, // divider - Match elevated
    )
}
