//! Built-in key table.
//!
//! Every parameter the vehicle stack reads or writes, with the lifecycle
//! flags that decide when it is purged.

use super::flags::LifecycleFlags as F;

pub(crate) const BUILTIN_KEYS: &[(&str, F)] = &[
    ("AccessToken", F::CLEAR_ON_MANAGER_START.union(F::DONT_LOG)),
    ("AthenadPid", F::PERSISTENT),
    ("BootedOnroad", F::CLEAR_ON_MANAGER_START.union(F::CLEAR_ON_IGNITION_OFF)),
    ("CalibrationParams", F::PERSISTENT),
    ("CarBatteryCapacity", F::PERSISTENT),
    (
        "CarParams",
        F::CLEAR_ON_MANAGER_START
            .union(F::CLEAR_ON_PANDA_DISCONNECT)
            .union(F::CLEAR_ON_IGNITION_ON),
    ),
    ("CarParamsCache", F::CLEAR_ON_MANAGER_START.union(F::CLEAR_ON_PANDA_DISCONNECT)),
    (
        "CarVin",
        F::CLEAR_ON_MANAGER_START
            .union(F::CLEAR_ON_PANDA_DISCONNECT)
            .union(F::CLEAR_ON_IGNITION_ON),
    ),
    ("CommunityFeaturesToggle", F::PERSISTENT),
    ("CompletedTrainingVersion", F::PERSISTENT),
    (
        "ControlsReady",
        F::CLEAR_ON_MANAGER_START
            .union(F::CLEAR_ON_PANDA_DISCONNECT)
            .union(F::CLEAR_ON_IGNITION_ON),
    ),
    ("CurrentRoute", F::CLEAR_ON_MANAGER_START.union(F::CLEAR_ON_IGNITION_ON)),
    ("DisablePowerDown", F::PERSISTENT),
    ("DisableRadar_Allow", F::PERSISTENT),
    ("DisableRadar", F::PERSISTENT),
    ("DisableUpdates", F::PERSISTENT),
    ("DongleId", F::PERSISTENT),
    ("DoUninstall", F::CLEAR_ON_MANAGER_START),
    ("EnableWideCamera", F::CLEAR_ON_MANAGER_START),
    ("EndToEndToggle", F::PERSISTENT),
    ("ForcePowerDown", F::CLEAR_ON_MANAGER_START),
    ("GitBranch", F::PERSISTENT),
    ("GitCommit", F::PERSISTENT),
    ("GitDiff", F::PERSISTENT),
    ("GithubSshKeys", F::PERSISTENT),
    ("GithubUsername", F::PERSISTENT),
    ("GitRemote", F::PERSISTENT),
    ("GsmApn", F::PERSISTENT),
    ("GsmRoaming", F::PERSISTENT),
    ("HardwareSerial", F::PERSISTENT),
    ("HasAcceptedTerms", F::PERSISTENT),
    ("IMEI", F::PERSISTENT),
    ("InstallDate", F::PERSISTENT),
    ("IsDriverViewEnabled", F::CLEAR_ON_MANAGER_START),
    ("IsLdwEnabled", F::PERSISTENT),
    ("IsMetric", F::PERSISTENT),
    ("IsOffroad", F::CLEAR_ON_MANAGER_START),
    ("IsOnroad", F::PERSISTENT),
    ("IsRHD", F::PERSISTENT),
    ("IsTakingSnapshot", F::CLEAR_ON_MANAGER_START),
    ("IsUpdateAvailable", F::CLEAR_ON_MANAGER_START),
    ("JoystickDebugMode", F::CLEAR_ON_MANAGER_START.union(F::CLEAR_ON_IGNITION_OFF)),
    ("LastAthenaPingTime", F::CLEAR_ON_MANAGER_START),
    ("LastGPSPosition", F::PERSISTENT),
    ("LastUpdateException", F::PERSISTENT),
    ("LastUpdateTime", F::PERSISTENT),
    ("LiveParameters", F::PERSISTENT),
    ("NavDestination", F::CLEAR_ON_MANAGER_START.union(F::CLEAR_ON_IGNITION_OFF)),
    ("NavSettingTime24h", F::PERSISTENT),
    ("OpenpilotEnabledToggle", F::PERSISTENT),
    ("PandaHeartbeatLost", F::CLEAR_ON_MANAGER_START.union(F::CLEAR_ON_IGNITION_OFF)),
    ("Passive", F::PERSISTENT),
    ("PrimeRedirected", F::PERSISTENT),
    ("RecordFront", F::PERSISTENT),
    ("RecordFrontLock", F::PERSISTENT),
    ("ReleaseNotes", F::PERSISTENT),
    ("ShouldDoUpdate", F::CLEAR_ON_MANAGER_START),
    ("SshEnabled", F::PERSISTENT),
    ("SubscriberInfo", F::PERSISTENT),
    ("TermsVersion", F::PERSISTENT),
    ("Timezone", F::PERSISTENT),
    ("TrainingVersion", F::PERSISTENT),
    ("UpdateAvailable", F::CLEAR_ON_MANAGER_START),
    ("UpdateFailedCount", F::CLEAR_ON_MANAGER_START),
    ("UploadRaw", F::PERSISTENT),
    ("Version", F::PERSISTENT),
    ("VisionRadarToggle", F::PERSISTENT),
    ("ApiCache_Device", F::PERSISTENT),
    ("ApiCache_DriveStats", F::PERSISTENT),
    ("ApiCache_NavDestinations", F::PERSISTENT),
    ("ApiCache_Owner", F::PERSISTENT),
    ("Offroad_ChargeDisabled", F::CLEAR_ON_MANAGER_START.union(F::CLEAR_ON_PANDA_DISCONNECT)),
    ("Offroad_ConnectivityNeeded", F::CLEAR_ON_MANAGER_START),
    ("Offroad_ConnectivityNeededPrompt", F::CLEAR_ON_MANAGER_START),
    ("Offroad_HardwareUnsupported", F::CLEAR_ON_MANAGER_START),
    ("Offroad_InvalidTime", F::CLEAR_ON_MANAGER_START),
    ("Offroad_IsTakingSnapshot", F::CLEAR_ON_MANAGER_START),
    ("Offroad_NeosUpdate", F::CLEAR_ON_MANAGER_START),
    ("Offroad_StorageMissing", F::CLEAR_ON_MANAGER_START),
    (
        "Offroad_PandaFirmwareMismatch",
        F::CLEAR_ON_MANAGER_START.union(F::CLEAR_ON_PANDA_DISCONNECT),
    ),
    ("Offroad_TemperatureTooHigh", F::CLEAR_ON_MANAGER_START),
    ("Offroad_UnofficialHardware", F::CLEAR_ON_MANAGER_START),
    ("Offroad_UpdateFailed", F::CLEAR_ON_MANAGER_START),
    ("GitCommitRemote", F::PERSISTENT),
    ("IsOpenpilotViewEnabled", F::CLEAR_ON_MANAGER_START),
    ("OpkrAutoShutdown", F::PERSISTENT),
    ("OpkrForceShutdown", F::PERSISTENT),
    ("OpkrForceShutdownTrigger", F::PERSISTENT),
    ("OpkrAutoScreenOff", F::PERSISTENT),
    ("OpkrUIBrightness", F::PERSISTENT),
    ("OpkrUIVolumeBoost", F::PERSISTENT),
    ("OpkrEnableDriverMonitoring", F::PERSISTENT),
    ("OpkrEnableLogger", F::PERSISTENT),
    ("OpkrEnableGetoffAlert", F::PERSISTENT),
    ("OpkrAutoResume", F::PERSISTENT),
    ("OpkrVariableCruise", F::PERSISTENT),
    ("OpkrLaneChangeSpeed", F::PERSISTENT),
    ("OpkrAutoLaneChangeDelay", F::PERSISTENT),
    ("OpkrSteerAngleCorrection", F::PERSISTENT),
    ("PutPrebuiltOn", F::PERSISTENT),
    ("LdwsCarFix", F::PERSISTENT),
    ("LateralControlMethod", F::PERSISTENT),
    ("CruiseStatemodeSelInit", F::PERSISTENT),
    ("OuterLoopGain", F::PERSISTENT),
    ("InnerLoopGain", F::PERSISTENT),
    ("TimeConstant", F::PERSISTENT),
    ("ActuatorEffectiveness", F::PERSISTENT),
    ("Scale", F::PERSISTENT),
    ("LqrKi", F::PERSISTENT),
    ("DcGain", F::PERSISTENT),
    ("IgnoreZone", F::PERSISTENT),
    ("PidKp", F::PERSISTENT),
    ("PidKi", F::PERSISTENT),
    ("PidKd", F::PERSISTENT),
    ("PidKf", F::PERSISTENT),
    ("CameraOffsetAdj", F::PERSISTENT),
    ("PathOffsetAdj", F::PERSISTENT),
    ("SteerRatioAdj", F::PERSISTENT),
    ("SteerRatioMaxAdj", F::PERSISTENT),
    ("SteerActuatorDelayAdj", F::PERSISTENT),
    ("SteerRateCostAdj", F::PERSISTENT),
    ("SteerLimitTimerAdj", F::PERSISTENT),
    ("TireStiffnessFactorAdj", F::PERSISTENT),
    ("SteerMaxAdj", F::PERSISTENT),
    ("SteerMaxBaseAdj", F::PERSISTENT),
    ("SteerDeltaUpAdj", F::PERSISTENT),
    ("SteerDeltaUpBaseAdj", F::PERSISTENT),
    ("SteerDeltaDownAdj", F::PERSISTENT),
    ("SteerDeltaDownBaseAdj", F::PERSISTENT),
    ("SteerMaxvAdj", F::PERSISTENT),
    ("OpkrBatteryChargingControl", F::PERSISTENT),
    ("OpkrBatteryChargingMin", F::PERSISTENT),
    ("OpkrBatteryChargingMax", F::PERSISTENT),
    ("LeftCurvOffsetAdj", F::PERSISTENT),
    ("RightCurvOffsetAdj", F::PERSISTENT),
    ("DebugUi1", F::PERSISTENT),
    ("DebugUi2", F::PERSISTENT),
    ("LongLogDisplay", F::PERSISTENT),
    ("OpkrBlindSpotDetect", F::PERSISTENT),
    ("OpkrMaxAngleLimit", F::PERSISTENT),
    ("OpkrSpeedLimitOffset", F::PERSISTENT),
    ("OpkrLiveSteerRatio", F::PERSISTENT),
    ("OpkrVariableSteerMax", F::PERSISTENT),
    ("OpkrVariableSteerDelta", F::PERSISTENT),
    ("FingerprintTwoSet", F::PERSISTENT),
    ("OpkrDrivingRecord", F::PERSISTENT),
    ("OpkrTurnSteeringDisable", F::PERSISTENT),
    ("CarModel", F::PERSISTENT),
    ("OpkrHotspotOnBoot", F::PERSISTENT),
    ("OpkrSSHLegacy", F::PERSISTENT),
    ("CruiseOverMaxSpeed", F::PERSISTENT),
    ("JustDoGearD", F::PERSISTENT),
    ("LanelessMode", F::PERSISTENT),
    ("ComIssueGone", F::PERSISTENT),
    ("MaxSteer", F::PERSISTENT),
    ("MaxRTDelta", F::PERSISTENT),
    ("MaxRateUp", F::PERSISTENT),
    ("MaxRateDown", F::PERSISTENT),
    ("SteerThreshold", F::PERSISTENT),
    ("RecordingCount", F::PERSISTENT),
    ("RecordingQuality", F::PERSISTENT),
    ("CruiseGapAdjust", F::PERSISTENT),
    ("AutoEnable", F::PERSISTENT),
    ("AutoEnableSpeed", F::PERSISTENT),
    ("CruiseAutoRes", F::PERSISTENT),
    ("AutoResOption", F::PERSISTENT),
    ("AutoResCondition", F::PERSISTENT),
    ("SteerWindDown", F::PERSISTENT),
    ("OpkrMonitoringMode", F::PERSISTENT),
    ("OpkrMonitorEyesThreshold", F::PERSISTENT),
    ("OpkrMonitorNormalEyesThreshold", F::PERSISTENT),
    ("OpkrMonitorBlinkThreshold", F::PERSISTENT),
    ("MadModeEnabled", F::PERSISTENT),
    ("CommaStockUI", F::PERSISTENT),
    ("OpkrEnableUploader", F::PERSISTENT),
    ("OpkrMapEnable", F::CLEAR_ON_MANAGER_START),
    ("WhitePandaSupport", F::PERSISTENT),
    ("SteerWarningFix", F::PERSISTENT),
    ("OpkrRunNaviOnBoot", F::PERSISTENT),
    ("CruiseGapNow", F::PERSISTENT),
    ("CruiseGap1", F::PERSISTENT),
    ("CruiseGap2", F::PERSISTENT),
    ("CruiseGap3", F::PERSISTENT),
    ("CruiseGap4", F::PERSISTENT),
    ("DynamicTR", F::PERSISTENT),
    ("OpkrBattLess", F::PERSISTENT),
    ("LCTimingFactorUD", F::PERSISTENT),
    ("LCTimingFactor30", F::PERSISTENT),
    ("LCTimingFactor60", F::PERSISTENT),
    ("LCTimingFactor80", F::PERSISTENT),
    ("LCTimingFactor110", F::PERSISTENT),
    ("OpkrUIBrightnessOff", F::PERSISTENT),
    ("LCTimingFactorEnable", F::PERSISTENT),
    ("SafetyCamDecelDistGain", F::PERSISTENT),
    ("OpkrLiveTunePanelEnable", F::PERSISTENT),
    ("KRDateShow", F::PERSISTENT),
    ("KRTimeShow", F::PERSISTENT),
    ("RadarLongHelper", F::PERSISTENT),
    ("GitPullOnBoot", F::PERSISTENT),
    ("LiveSteerRatioPercent", F::PERSISTENT),
    ("StoppingDistAdj", F::PERSISTENT),
    ("ShowError", F::PERSISTENT),
    ("CommaLong", F::PERSISTENT),
    ("AutoResLimitTime", F::PERSISTENT),
    ("VCurvSpeed30", F::PERSISTENT),
    ("VCurvSpeed50", F::PERSISTENT),
    ("VCurvSpeed70", F::PERSISTENT),
    ("VCurvSpeed90", F::PERSISTENT),
    ("VCurvSpeedUD", F::PERSISTENT),
    ("OCurvOffset", F::PERSISTENT),
    ("StockNaviSpeedEnabled", F::PERSISTENT),
];
